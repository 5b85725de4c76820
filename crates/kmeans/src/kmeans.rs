use super::*;
use modal_core::*;
use modal_geometry::*;
use rayon::prelude::*;

/// Sequential k-means over any [`Geometry`].
///
/// Seeding is a deterministic contiguous split of the input, not a
/// distance-aware scheme like k-means++. Each pass then visits every point of
/// every cluster in order and migrates it to the cluster with the nearest
/// centroid (lowest index on ties), refusing any move that would empty a
/// cluster. The loop ends after a pass with no moves.
///
/// There is no iteration cap. Every migration is to a strictly-nearer or
/// equally-near lower-index centroid, which strictly lowers the within-cluster
/// sum of squares, so the loop terminates. Reassignment is single-threaded:
/// the clusters are shared mutable state.
pub struct KMeans<G> {
    geometry: G,
    k: usize,
}

impl<G> KMeans<G>
where
    G: Geometry,
{
    pub fn new(geometry: G, k: usize) -> Self {
        Self { geometry, k }
    }

    /// Partitions `points` into exactly `k` non-empty clusters.
    pub fn cluster(&self, points: &[G::P]) -> Result<Vec<Cluster<G::P>>> {
        self.validate(points.len())?;
        log::info!("{:<32}{:<32}", "kmeans splitting", points.len());
        let mut clusters = self.split(points)?;
        let mut passes = 0;
        loop {
            passes += 1;
            let moves = self.pass(&mut clusters)?;
            log::debug!("kmeans pass {:>4} moved {:>8}", passes, moves);
            if moves == 0 {
                break;
            }
        }
        log::info!("{:<32}{:<32}", "kmeans converged after", passes);
        Ok(clusters)
    }

    /// Index and squared distance of the nearest cluster centroid.
    /// Ties go to the lowest index.
    pub fn neighbor(&self, clusters: &[Cluster<G::P>], x: &G::P) -> (usize, Energy) {
        clusters
            .iter()
            .enumerate()
            .map(|(j, c)| (j, self.geometry.distance(x, c.centroid())))
            .fold((0, Energy::INFINITY), |best, next| {
                if next.1 < best.1 { next } else { best }
            })
    }

    /// True when a reassignment pass over `clusters` would move nothing.
    pub fn stable(&self, clusters: &[Cluster<G::P>]) -> bool {
        clusters.iter().enumerate().all(|(j, c)| {
            c.len() == 1
                || c.points()
                    .iter()
                    .all(|x| self.neighbor(clusters, x).0 == j)
        })
    }

    /// Within-cluster sum of squared distances.
    pub fn loss(&self, clusters: &[Cluster<G::P>]) -> Energy {
        clusters
            .par_iter()
            .map(|c| {
                c.points()
                    .iter()
                    .map(|x| self.geometry.distance(x, c.centroid()))
                    .sum::<Energy>()
            })
            .sum::<Energy>()
    }

    fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            Err(Error::InvalidParameter("kmeans needs at least one point".into()))
        } else if self.k == 0 {
            Err(Error::InvalidParameter("kmeans needs k >= 1".into()))
        } else if self.k > n {
            Err(Error::InvalidParameter(format!(
                "cannot split {} points into {} non-empty clusters",
                n, self.k
            )))
        } else {
            Ok(())
        }
    }

    /// Contiguous chunks of `n / k` points; the first `n % k` chunks
    /// take one extra point each.
    fn split(&self, points: &[G::P]) -> Result<Vec<Cluster<G::P>>> {
        let size = points.len() / self.k;
        let rest = points.len() % self.k;
        let mut start = 0;
        (0..self.k)
            .map(|i| {
                let end = start + size + usize::from(i < rest);
                let chunk = points[start..end].to_vec();
                start = end;
                Cluster::build(&self.geometry, chunk)
            })
            .collect()
    }

    /// One reassignment pass. Returns the number of points moved.
    fn pass(&self, clusters: &mut [Cluster<G::P>]) -> Result<usize> {
        let mut moves = 0;
        for c in 0..clusters.len() {
            let mut i = 0;
            while i < clusters[c].len() {
                let x = clusters[c].points()[i];
                let (j, _) = self.neighbor(clusters, &x);
                if j != c {
                    if let Some(x) = clusters[c].remove(&self.geometry, i)? {
                        clusters[j].insert(&self.geometry, x)?;
                        moves += 1;
                        // successor has shifted into slot i
                        continue;
                    }
                }
                i += 1;
            }
        }
        Ok(moves)
    }
}
