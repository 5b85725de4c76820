use super::*;
use modal_core::*;

/// The real line. Points are `f64`, distance is `(a - b)^2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl Geometry for Scalar {
    type P = f64;
    type S = f64;

    fn distance(&self, a: &f64, b: &f64) -> Energy {
        (a - b) * (a - b)
    }
    fn zero(&self) -> f64 {
        0.
    }
    fn lift(&self, p: &f64, weight: Weight) -> f64 {
        p * weight
    }
    fn merge(&self, a: f64, b: f64) -> f64 {
        a + b
    }
    fn project(&self, sum: f64, total: Weight) -> f64 {
        sum / total
    }
    fn equal(&self, a: &f64, b: &f64) -> bool {
        a == b
    }
}
