//! Weighting kernels for density-gradient clustering.
//!
//! A [`Kernel`] turns a squared distance into a non-negative weight that
//! never increases with distance. Both variants are parameterized by a single
//! bandwidth and are stateless once constructed.
//!
//! - [`Flat`] — Uniform window, hard cutoff at the bandwidth
//! - [`Gaussian`] — Smooth exponential falloff with scale `bandwidth`
mod flat;
mod gaussian;
mod kernel;

pub use flat::*;
pub use gaussian::*;
pub use kernel::*;
