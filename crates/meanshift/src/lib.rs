//! Density-gradient clustering.
//!
//! Every point climbs the kernel density estimate of the (fixed) input set
//! until its shift becomes negligible; points whose summits coincide form a
//! [`Mode`]. The climb is independent per point, which is what makes the
//! three execution strategies interchangeable.
//!
//! ## Strategies
//!
//! - [`MeanShift::cluster`] — Sequential
//! - [`MeanShift::cluster_parallel`] — Rayon fan-out over points
//! - [`MeanShift::cluster_batch`] — Weights from an [`Accelerator`]
//!
//! ## Accelerators
//!
//! - [`Accelerator`] — Batch weight computation contract
//! - [`Parallel`] — Host backend over rayon
mod accelerator;
#[cfg(test)]
mod equivalence;
mod meanshift;
mod mode;

pub use accelerator::*;
pub use meanshift::*;
pub use mode::*;
