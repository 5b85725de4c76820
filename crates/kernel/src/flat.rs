use super::*;
use modal_core::*;

/// Indicator window: weight 1 within `bandwidth` of the centre, 0 outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flat {
    bandwidth: Energy,
}

impl From<Energy> for Flat {
    fn from(bandwidth: Energy) -> Self {
        Self { bandwidth }
    }
}

impl Kernel for Flat {
    fn weight(&self, distance: Energy) -> Weight {
        // compare squared to skip the sqrt
        if distance <= self.bandwidth * self.bandwidth {
            1.
        } else {
            0.
        }
    }
    fn bandwidth(&self) -> Energy {
        self.bandwidth
    }
}
