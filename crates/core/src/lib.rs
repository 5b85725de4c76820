//! Core type aliases, errors, and constants for modal.
//!
//! This crate provides the foundational types and tuning parameters
//! shared by the geometry, kernel, and clustering crates.
mod error;

pub use error::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Squared distances, convergence thresholds, and kernel bandwidths.
pub type Energy = f64;
/// Kernel weights, point multiplicities, and accumulated mass.
pub type Weight = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// K-MEANS CLUSTERING
// Sequential nearest-centroid reassignment over a contiguous initial split.
// ============================================================================
/// Cluster count used by the command line driver when none is given.
pub const KMEANS_DEFAULT_K: usize = 3;

// ============================================================================
// MEAN SHIFT CLUSTERING
// Per-point gradient ascent on the kernel density estimate.
// Thresholds scale with the kernel bandwidth so that the same defaults
// work for unit-scale scalars and 0..255 colour channels alike.
// ============================================================================
/// Maximum shifts per point before the ascent is reported as non-convergent.
pub const MEANSHIFT_ITERATIONS: usize = 512;
/// Shift length, as a fraction of bandwidth, below which a point has converged.
pub const MEANSHIFT_CONVERGENCE_RATIO: Energy = 1e-4;
/// Distance, as a fraction of bandwidth, within which converged points share a mode.
pub const MEANSHIFT_MERGE_RATIO: Energy = 0.5;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "runtime")]
pub fn log() -> std::io::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|t| t.as_secs())
        .unwrap_or_default();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(std::io::Error::other)
}
