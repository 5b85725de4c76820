use modal_core::*;

/// Maps a squared distance to a neighbour weight.
///
/// # Invariant
///
/// `weight(d) >= 0` for every `d >= 0`, and `weight` is non-increasing in `d`.
pub trait Kernel: Sync {
    /// Weight of a neighbour at squared distance `distance`.
    fn weight(&self, distance: Energy) -> Weight;
    /// Radius (flat) or scale (Gaussian) of the kernel.
    fn bandwidth(&self) -> Energy;

    /// Rejects bandwidths that would make every weight degenerate.
    fn validate(&self) -> Result<()> {
        let b = self.bandwidth();
        if b.is_finite() && b > 0. {
            Ok(())
        } else {
            Err(Error::InvalidParameter(format!(
                "kernel bandwidth must be finite and positive, got {}",
                b
            )))
        }
    }
}
