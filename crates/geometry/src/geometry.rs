use super::*;
use modal_core::*;

/// Distance, equality, and averaging over a single point type.
///
/// A geometry is a stateless capability: implementations are zero-sized or
/// hold only immutable configuration, and every method is a pure function of
/// its arguments. Algorithms are written against this trait and never inspect
/// point coordinates themselves.
///
/// # Required Methods
///
/// - `distance()` — Squared distance, symmetric and non-negative
/// - `zero()` — The empty running sum
/// - `lift()` — Embed a weighted point into the sum space
/// - `merge()` — Add two running sums
/// - `project()` — Divide a running sum by its total weight
///
/// # Invariant
///
/// `distance(a, b) == 0` exactly when `equal(a, b)`. Folding N points with
/// `absorb` and calling `finalize` yields their arithmetic mean.
pub trait Geometry: Sync {
    /// Point type being clustered.
    type P: Copy + Send + Sync + std::fmt::Debug;
    /// Running weighted sum of points.
    type S: Copy + Send;

    /// Squared distance between two points.
    fn distance(&self, a: &Self::P, b: &Self::P) -> Energy;
    /// The additive identity of the sum space.
    fn zero(&self) -> Self::S;
    /// `weight * p`, expressed in the sum space.
    fn lift(&self, p: &Self::P, weight: Weight) -> Self::S;
    /// `a + b` in the sum space.
    fn merge(&self, a: Self::S, b: Self::S) -> Self::S;
    /// `sum / total`, projected back to a point. `total` is strictly positive.
    fn project(&self, sum: Self::S, total: Weight) -> Self::P;

    fn equal(&self, a: &Self::P, b: &Self::P) -> bool {
        self.distance(a, b) == 0.
    }
    /// Tolerant equality: `distance(a, b) <= tolerance`.
    fn within(&self, a: &Self::P, b: &Self::P, tolerance: Energy) -> bool {
        self.distance(a, b) <= tolerance
    }

    fn identity(&self) -> Accumulator<Self::S> {
        Accumulator::from(self.zero())
    }
    /// Fold one unit-weight point into the running average.
    fn absorb(&self, acc: Accumulator<Self::S>, p: &Self::P) -> Accumulator<Self::S> {
        self.absorb_weighted(acc, p, 1.)
    }
    /// Fold one weighted point into the running average.
    fn absorb_weighted(
        &self,
        acc: Accumulator<Self::S>,
        p: &Self::P,
        weight: Weight,
    ) -> Accumulator<Self::S> {
        let (sum, total) = acc.into_parts();
        Accumulator::new(self.merge(sum, self.lift(p, weight)), total + weight)
    }
    /// Resolve a running average. Fails unless the total weight is positive.
    fn finalize(&self, acc: Accumulator<Self::S>) -> Result<Self::P> {
        let (sum, total) = acc.into_parts();
        if total > 0. {
            Ok(self.project(sum, total))
        } else {
            Err(Error::DegenerateAverage)
        }
    }

    /// Arithmetic mean. Fails on empty input.
    fn average(&self, items: &[Self::P]) -> Result<Self::P> {
        self.finalize(
            items
                .iter()
                .fold(self.identity(), |acc, p| self.absorb(acc, p)),
        )
    }
    /// Weighted mean. Fails when the weights sum to zero.
    fn weighted_average(&self, items: &[(Self::P, Weight)]) -> Result<Self::P> {
        self.finalize(
            items
                .iter()
                .fold(self.identity(), |acc, (p, w)| self.absorb_weighted(acc, p, *w)),
        )
    }
}
