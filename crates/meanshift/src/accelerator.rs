use modal_core::*;
use modal_geometry::*;
use modal_kernel::*;
use rayon::prelude::*;

/// Batch kernel-weight computation, offloadable to a parallel device.
///
/// The point buffer is loaded once per clustering run and never mutated.
/// Each call to `weights` evaluates `kernel(distance(candidate, q))` for every
/// `q` in the buffer and returns the weights in buffer order. Convergence
/// looping and averaging stay on the host.
pub trait Accelerator<G, K>
where
    G: Geometry,
    K: Kernel,
{
    /// Backend-resident copy of the point buffer.
    type Batch;
    fn load(&self, points: &[G::P]) -> Result<Self::Batch>;
    fn weights(&self, batch: &Self::Batch, candidate: &G::P, kernel: &K) -> Result<Vec<Weight>>;
}

/// Host backend: evaluates the batch with rayon over the shared buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel<G> {
    geometry: G,
}

impl<G> From<G> for Parallel<G> {
    fn from(geometry: G) -> Self {
        Self { geometry }
    }
}

impl<G, K> Accelerator<G, K> for Parallel<G>
where
    G: Geometry,
    K: Kernel,
{
    type Batch = Vec<G::P>;

    fn load(&self, points: &[G::P]) -> Result<Vec<G::P>> {
        Ok(points.to_vec())
    }
    fn weights(&self, batch: &Vec<G::P>, candidate: &G::P, kernel: &K) -> Result<Vec<Weight>> {
        Ok(batch
            .par_iter()
            .map(|q| kernel.weight(self.geometry.distance(candidate, q)))
            .collect::<Vec<Weight>>())
    }
}
