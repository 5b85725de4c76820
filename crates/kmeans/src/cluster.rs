use modal_core::*;
use modal_geometry::*;

/// An ordered group of points together with their centroid.
///
/// The centroid is recomputed through [`Geometry::average`] whenever
/// membership changes, so reading it always reflects current membership.
/// A cluster can never be emptied: removing its last point is refused.
#[derive(Debug, Clone)]
pub struct Cluster<P> {
    points: Vec<P>,
    centroid: P,
}

impl<P> Cluster<P>
where
    P: Copy,
{
    /// Builds a cluster from a non-empty set of points.
    pub fn build<G>(geometry: &G, points: Vec<P>) -> Result<Self>
    where
        G: Geometry<P = P>,
    {
        let centroid = geometry.average(&points)?;
        Ok(Self { points, centroid })
    }
    pub fn centroid(&self) -> &P {
        &self.centroid
    }
    pub fn points(&self) -> &[P] {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a point and refreshes the centroid.
    pub(crate) fn insert<G>(&mut self, geometry: &G, p: P) -> Result<()>
    where
        G: Geometry<P = P>,
    {
        self.points.push(p);
        self.centroid = geometry.average(&self.points)?;
        Ok(())
    }
    /// Removes the `i`th point, unless it is the last one left.
    pub(crate) fn remove<G>(&mut self, geometry: &G, i: usize) -> Result<Option<P>>
    where
        G: Geometry<P = P>,
    {
        if self.points.len() <= 1 {
            return Ok(None);
        }
        let p = self.points.remove(i);
        self.centroid = geometry.average(&self.points)?;
        Ok(Some(p))
    }
}
