//! Point geometries for generic clustering.
//!
//! Clustering algorithms never touch coordinates directly. Everything they
//! need from a point type (squared distance, equality, and averaging) goes
//! through a [`Geometry`], so the same KMeans and MeanShift code runs over
//! scalars, vectors, and colours.
//!
//! ## Core Types
//!
//! - [`Geometry`] — Distance, equality, and averaging over one point type
//! - [`Accumulator`] — Running weighted sum for streaming averages
//!
//! ## Geometries
//!
//! - [`Scalar`] — Real line over `f64`
//! - [`Euclidean`] — `D`-dimensional Euclidean space over `[f32; D]`
//! - [`Chroma`] — RGB colour space over [`Rgb`]
mod accumulator;
mod euclidean;
mod geometry;
mod rgb;
mod scalar;

pub use accumulator::*;
pub use euclidean::*;
pub use geometry::*;
pub use rgb::*;
pub use scalar::*;
