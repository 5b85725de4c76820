use super::*;
use modal_core::*;

/// Gaussian falloff `exp(-d² / 2σ²)` with `σ = bandwidth`.
///
/// Every point contributes, so the weighted average is never degenerate
/// unless the exponent underflows for every neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    bandwidth: Energy,
}

impl From<Energy> for Gaussian {
    fn from(bandwidth: Energy) -> Self {
        Self { bandwidth }
    }
}

impl Kernel for Gaussian {
    fn weight(&self, distance: Energy) -> Weight {
        (-distance / (2. * self.bandwidth * self.bandwidth)).exp()
    }
    fn bandwidth(&self) -> Energy {
        self.bandwidth
    }
}
