use super::*;
use modal_core::*;

/// `D`-dimensional Euclidean space over `f32` coordinates.
///
/// Coordinates are stored as `f32` (the layout accelerators expect), but
/// distances and running sums are carried in `f64` so that long weighted folds
/// do not lose precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean<const D: usize>;

/// The Euclidean plane.
pub type Plane = Euclidean<2>;
/// Euclidean 3-space.
pub type Space = Euclidean<3>;

impl<const D: usize> Geometry for Euclidean<D> {
    type P = [f32; D];
    type S = [f64; D];

    fn distance(&self, a: &[f32; D], b: &[f32; D]) -> Energy {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| *x as Energy - *y as Energy)
            .map(|delta| delta * delta)
            .sum::<Energy>()
    }
    fn zero(&self) -> [f64; D] {
        [0.; D]
    }
    fn lift(&self, p: &[f32; D], weight: Weight) -> [f64; D] {
        std::array::from_fn(|i| p[i] as f64 * weight)
    }
    fn merge(&self, a: [f64; D], b: [f64; D]) -> [f64; D] {
        std::array::from_fn(|i| a[i] + b[i])
    }
    fn project(&self, sum: [f64; D], total: Weight) -> [f32; D] {
        std::array::from_fn(|i| (sum[i] / total) as f32)
    }
    fn equal(&self, a: &[f32; D], b: &[f32; D]) -> bool {
        a == b
    }
}
