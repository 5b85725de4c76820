//! Centroid partitioning.
//!
//! Splits a point sequence into exactly `k` non-empty clusters by repeatedly
//! moving each point to the cluster with the nearest centroid, until a full
//! pass moves nothing.
//!
//! - [`KMeans`] — The partitioning algorithm
//! - [`Cluster`] — An ordered, never-empty group of points and its centroid
mod cluster;
mod kmeans;

pub use cluster::*;
pub use kmeans::*;
