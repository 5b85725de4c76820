use modal_core::*;

/// A cluster found by mean shift: the summit that its members climbed to.
///
/// Immutable once built. `mass` is the member count for unweighted input,
/// or the summed input weight for weighted input.
#[derive(Debug, Clone)]
pub struct Mode<P> {
    centroid: P,
    members: Vec<P>,
    mass: Weight,
}

impl<P> Mode<P> {
    pub(crate) fn new(centroid: P, members: Vec<P>, mass: Weight) -> Self {
        Self {
            centroid,
            members,
            mass,
        }
    }
    pub fn centroid(&self) -> &P {
        &self.centroid
    }
    /// Input points that converged here, in input order.
    pub fn members(&self) -> &[P] {
        &self.members
    }
    pub fn mass(&self) -> Weight {
        self.mass
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The heaviest mode. Modes come back sorted by descending mass, so this is
/// always the first one.
pub fn dominant<P>(modes: &[Mode<P>]) -> Option<&Mode<P>> {
    modes.first()
}
