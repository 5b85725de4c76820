use modal_core::Weight;

/// Running weighted sum used to fold an average one point at a time.
///
/// `S` is the geometry's sum space, which may be wider than the point type
/// itself (e.g. `f64` sums over `f32` coordinates). Accumulators are plain
/// values: folding produces a new accumulator rather than mutating shared state,
/// so partial sums from different threads never alias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator<S> {
    sum: S,
    weight: Weight,
}

impl<S> Accumulator<S> {
    pub fn new(sum: S, weight: Weight) -> Self {
        Self { sum, weight }
    }
    pub fn into_parts(self) -> (S, Weight) {
        (self.sum, self.weight)
    }
}

impl<S> From<S> for Accumulator<S> {
    fn from(sum: S) -> Self {
        Self { sum, weight: 0. }
    }
}
