//! Generic clustering over arbitrary point geometries.
//!
//! This facade crate re-exports all public modal crates for convenient access.
//!
//! ## Crate Organization
//!
//! ### Core Types
//! - [`core`] — Type aliases, errors, and constants
//! - [`geometry`] — Distance and averaging per point type
//! - [`kernel`] — Flat and Gaussian weighting kernels
//!
//! ### Algorithms
//! - [`kmeans`] — Nearest-centroid partitioning
//! - [`meanshift`] — Mode seeking with sequential, parallel, and batch strategies
//!
//! ### Acceleration
//! - `gpu` — krnl compute backend (feature `gpu`)

pub use modal_core      as core;
pub use modal_geometry  as geometry;
pub use modal_kernel    as kernel;
pub use modal_kmeans    as kmeans;
pub use modal_meanshift as meanshift;
#[cfg(feature = "gpu")]
pub use modal_gpu       as gpu;
