/// Errors surfaced by the geometry, kernel, and clustering crates.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Rejected at algorithm entry, before any work is done.
    InvalidParameter(String),
    /// An average was requested over nothing, or over zero total weight.
    DegenerateAverage,
    /// The point at input index `point` was still moving after `iterations` shifts.
    NonConvergence { point: usize, iterations: usize },
    /// An accelerator backend failed or violated its output contract.
    Accelerator(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(s) => write!(f, "invalid parameter: {}", s),
            Self::DegenerateAverage => write!(f, "average of empty or zero-weight set"),
            Self::NonConvergence { point, iterations } => write!(
                f,
                "point {} did not converge within {} iterations",
                point, iterations
            ),
            Self::Accelerator(s) => write!(f, "accelerator failure: {}", s),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout modal.
pub type Result<T> = std::result::Result<T, Error>;
