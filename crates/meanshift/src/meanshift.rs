use super::*;
use modal_core::*;
use modal_geometry::*;
use modal_kernel::*;
use rayon::prelude::*;

/// Mean shift clustering over any [`Geometry`] and [`Kernel`].
///
/// Each point repeatedly moves to the kernel-weighted average of the input
/// set around its current position. The input set itself never moves, so
/// every point's climb depends only on its start and the frozen input: the
/// sequential, parallel, and batch strategies compute the same trajectories.
///
/// A climb stops once a step moves less than the (squared) tolerance, or
/// when the neighbourhood carries no weight at all, in which case the point
/// is treated as converged where it stands. Exceeding the iteration cap is an
/// error naming the lowest failing input index.
///
/// Converged positions are merged in input order: each joins the first group
/// whose seed lies within the merge tolerance. A mode's centroid is the
/// mass-weighted average of its members' summits, and modes are returned
/// heaviest first.
pub struct MeanShift<G, K> {
    geometry: G,
    kernel: K,
    tolerance: Energy,
    merge: Energy,
    iterations: usize,
    threads: Option<usize>,
}

/// Where a single climb ended and how many shifts it took.
#[derive(Debug, Clone, Copy)]
struct Peak<P> {
    position: P,
    steps: usize,
}

impl<G, K> MeanShift<G, K>
where
    G: Geometry,
    K: Kernel,
{
    /// Thresholds default to fixed fractions of the kernel bandwidth.
    pub fn new(geometry: G, kernel: K) -> Self {
        let b = kernel.bandwidth();
        Self {
            geometry,
            kernel,
            tolerance: (b * MEANSHIFT_CONVERGENCE_RATIO).powi(2),
            merge: (b * MEANSHIFT_MERGE_RATIO).powi(2),
            iterations: MEANSHIFT_ITERATIONS,
            threads: None,
        }
    }
    /// Squared shift at or below which a climb has converged.
    pub fn with_tolerance(mut self, tolerance: Energy) -> Self {
        self.tolerance = tolerance;
        self
    }
    /// Squared distance within which summits share a mode.
    pub fn with_merge(mut self, merge: Energy) -> Self {
        self.merge = merge;
        self
    }
    /// Maximum shifts per point.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
    /// Run parallel strategies on a dedicated pool of this many threads
    /// instead of the global rayon pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
    pub fn geometry(&self) -> &G {
        &self.geometry
    }
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Sequential strategy.
    pub fn cluster(&self, points: &[G::P]) -> Result<Vec<Mode<G::P>>> {
        self.validate(points.len())?;
        log::info!("{:<32}{:<32}", "meanshift sequential", points.len());
        let peaks = points
            .iter()
            .enumerate()
            .map(|(i, x)| self.ascend(i, *x, |y| self.shift(y, Self::unit(points))))
            .collect::<Result<Vec<_>>>()?;
        self.gather(Self::unit(points), peaks)
    }

    /// Parallel strategy: climbs fan out over the rayon pool and join before
    /// merging.
    pub fn cluster_parallel(&self, points: &[G::P]) -> Result<Vec<Mode<G::P>>> {
        self.validate(points.len())?;
        log::info!("{:<32}{:<32}", "meanshift parallel", points.len());
        let peaks = self.pool(|| {
            points
                .par_iter()
                .enumerate()
                .map(|(i, x)| self.ascend(i, *x, |y| self.shift(y, Self::unit(points))))
                .collect::<Vec<_>>()
        })?;
        let peaks = peaks.into_iter().collect::<Result<Vec<_>>>()?;
        self.gather(Self::unit(points), peaks)
    }

    /// Batch strategy: kernel weights for the whole buffer come from
    /// `accelerator` on every shift; averaging and looping stay here.
    pub fn cluster_batch<A>(&self, points: &[G::P], accelerator: &A) -> Result<Vec<Mode<G::P>>>
    where
        A: Accelerator<G, K>,
    {
        self.validate(points.len())?;
        log::info!("{:<32}{:<32}", "meanshift batch", points.len());
        let ref batch = accelerator.load(points)?;
        let peaks = points
            .iter()
            .enumerate()
            .map(|(i, x)| {
                self.ascend(i, *x, |y| {
                    let weights = accelerator.weights(batch, y, &self.kernel)?;
                    if weights.len() != points.len() {
                        return Err(Error::Accelerator(format!(
                            "expected {} weights, got {}",
                            points.len(),
                            weights.len()
                        )));
                    }
                    self.mean(points.iter().zip(weights))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.gather(Self::unit(points), peaks)
    }

    /// Sequential strategy over points with multiplicities.
    /// Equivalent to repeating each point `weight` times.
    pub fn cluster_weighted(&self, points: &[(G::P, Weight)]) -> Result<Vec<Mode<G::P>>> {
        self.validate(points.len())?;
        Self::positive(points)?;
        log::info!("{:<32}{:<32}", "meanshift weighted", points.len());
        let peaks = points
            .iter()
            .enumerate()
            .map(|(i, (x, _))| self.ascend(i, *x, |y| self.shift(y, Self::held(points))))
            .collect::<Result<Vec<_>>>()?;
        self.gather(Self::held(points), peaks)
    }

    /// Parallel strategy over points with multiplicities.
    pub fn cluster_weighted_parallel(
        &self,
        points: &[(G::P, Weight)],
    ) -> Result<Vec<Mode<G::P>>> {
        self.validate(points.len())?;
        Self::positive(points)?;
        log::info!("{:<32}{:<32}", "meanshift weighted parallel", points.len());
        let peaks = self.pool(|| {
            points
                .par_iter()
                .enumerate()
                .map(|(i, (x, _))| self.ascend(i, *x, |y| self.shift(y, Self::held(points))))
                .collect::<Vec<_>>()
        })?;
        let peaks = peaks.into_iter().collect::<Result<Vec<_>>>()?;
        self.gather(Self::held(points), peaks)
    }

    fn unit(points: &[G::P]) -> impl Iterator<Item = (&G::P, Weight)> {
        points.iter().map(|q| (q, 1.))
    }
    fn held(points: &[(G::P, Weight)]) -> impl Iterator<Item = (&G::P, Weight)> {
        points.iter().map(|(q, w)| (q, *w))
    }

    /// One mean shift step from `x` over a weighted neighbourhood.
    /// `None` when the neighbourhood carries no weight.
    fn shift<'a, I>(&self, x: &G::P, neighbours: I) -> Result<Option<G::P>>
    where
        I: Iterator<Item = (&'a G::P, Weight)>,
        G::P: 'a,
    {
        self.mean(neighbours.map(|(q, w)| (q, w * self.kernel.weight(self.geometry.distance(x, q)))))
    }

    /// Weighted average with zero total weight mapped to `None`.
    fn mean<'a, I>(&self, weighted: I) -> Result<Option<G::P>>
    where
        I: Iterator<Item = (&'a G::P, Weight)>,
        G::P: 'a,
    {
        let acc = weighted.fold(self.geometry.identity(), |acc, (q, w)| {
            self.geometry.absorb_weighted(acc, q, w)
        });
        match self.geometry.finalize(acc) {
            Ok(p) => Ok(Some(p)),
            Err(Error::DegenerateAverage) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Gradient ascent of the `index`th input point.
    fn ascend<F>(&self, index: usize, start: G::P, shift: F) -> Result<Peak<G::P>>
    where
        F: Fn(&G::P) -> Result<Option<G::P>>,
    {
        let mut position = start;
        for steps in 1..=self.iterations {
            match shift(&position)? {
                None => return Ok(Peak { position, steps }),
                Some(next) => {
                    let moved = self.geometry.distance(&position, &next);
                    position = next;
                    if moved <= self.tolerance {
                        log::trace!("point {:>8} converged in {:>4} steps", index, steps);
                        return Ok(Peak { position, steps });
                    }
                }
            }
        }
        log::warn!("point {} still moving after {} steps", index, self.iterations);
        Err(Error::NonConvergence {
            point: index,
            iterations: self.iterations,
        })
    }

    /// Groups summits into modes, heaviest first. A mode's centroid is the
    /// mass-weighted average of its members' summits.
    fn gather<'a, I>(&self, inputs: I, peaks: Vec<Peak<G::P>>) -> Result<Vec<Mode<G::P>>>
    where
        I: Iterator<Item = (&'a G::P, Weight)>,
        G::P: 'a,
    {
        let mut seeds = Vec::<G::P>::new();
        let mut groups = Vec::<(Vec<G::P>, Accumulator<G::S>)>::new();
        for ((x, w), peak) in inputs.zip(peaks) {
            let summit = peak.position;
            match seeds
                .iter()
                .position(|seed| self.geometry.within(seed, &summit, self.merge))
            {
                Some(g) => {
                    let (members, acc) = &mut groups[g];
                    members.push(*x);
                    *acc = self.geometry.absorb_weighted(*acc, &summit, w);
                }
                None => {
                    seeds.push(summit);
                    let acc = self.geometry.absorb_weighted(self.geometry.identity(), &summit, w);
                    groups.push((vec![*x], acc));
                }
            }
        }
        let mut modes = groups
            .into_iter()
            .map(|(members, acc)| {
                let (_, mass) = acc.into_parts();
                Ok(Mode::new(self.geometry.finalize(acc)?, members, mass))
            })
            .collect::<Result<Vec<_>>>()?;
        modes.sort_by(|a, b| b.mass().total_cmp(&a.mass()));
        log::info!("{:<32}{:<32}", "meanshift modes", modes.len());
        Ok(modes)
    }

    /// Runs `job` on the configured pool.
    fn pool<T, F>(&self, job: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.threads {
            None => Ok(job()),
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map(|pool| pool.install(job))
                .map_err(|e| Error::InvalidParameter(e.to_string())),
        }
    }

    fn validate(&self, n: usize) -> Result<()> {
        self.kernel.validate()?;
        if n == 0 {
            return Err(Error::InvalidParameter("meanshift needs at least one point".into()));
        }
        if self.iterations == 0 {
            return Err(Error::InvalidParameter("meanshift needs at least one iteration".into()));
        }
        if self.threads == Some(0) {
            return Err(Error::InvalidParameter("meanshift needs at least one thread".into()));
        }
        for (name, value) in [("tolerance", self.tolerance), ("merge", self.merge)] {
            if !(value.is_finite() && value >= 0.) {
                return Err(Error::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    fn positive(points: &[(G::P, Weight)]) -> Result<()> {
        match points.iter().position(|(_, w)| !(w.is_finite() && *w > 0.)) {
            None => Ok(()),
            Some(i) => Err(Error::InvalidParameter(format!(
                "weight of point {} must be finite and positive, got {}",
                i, points[i].1
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Kernel that gives no neighbour any weight.
    struct Null;
    impl Kernel for Null {
        fn weight(&self, _: Energy) -> Weight {
            0.
        }
        fn bandwidth(&self) -> Energy {
            1.
        }
    }

    #[test]
    fn two_modes_on_the_line() {
        let modes = MeanShift::new(Scalar, Flat::from(1.))
            .cluster(&[0., 0.1, 10., 10.1])
            .unwrap();
        assert_eq!(modes.len(), 2);
        assert!((modes[0].centroid() - 0.05).abs() < 1e-9, "{:?}", modes[0]);
        assert!((modes[1].centroid() - 10.05).abs() < 1e-9, "{:?}", modes[1]);
        assert_eq!(modes[0].members(), &[0., 0.1]);
        assert_eq!(modes[1].members(), &[10., 10.1]);
    }

    #[test]
    fn heaviest_mode_comes_first() {
        let modes = MeanShift::new(Scalar, Flat::from(1.))
            .cluster(&[0., 0.1, 10., 10.1, 10.2])
            .unwrap();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[0].len(), 3);
        assert_eq!(modes[1].len(), 2);
        let top = dominant(&modes).unwrap();
        assert!((top.centroid() - 10.1).abs() < 1e-9);
        assert!(modes.windows(2).all(|w| w[0].mass() >= w[1].mass()));
    }

    #[test]
    fn equal_mass_keeps_first_seen_order() {
        let modes = MeanShift::new(Scalar, Flat::from(1.))
            .cluster(&[10., 0., 10.1, 0.1])
            .unwrap();
        assert!((modes[0].centroid() - 10.05).abs() < 1e-9);
        assert!((modes[1].centroid() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn identical_points_form_one_mode() {
        let modes = MeanShift::new(Plane::default(), Gaussian::from(1.))
            .cluster(&vec![[3f32, -4.]; 12])
            .unwrap();
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].len(), 12);
        assert_eq!(*modes[0].centroid(), [3., -4.]);
    }

    #[test]
    fn weightless_neighbourhood_stays_put() {
        let modes = MeanShift::new(Scalar, Null).cluster(&[0., 10.]).unwrap();
        assert_eq!(modes.len(), 2);
        assert_eq!(*modes[0].centroid(), 0.);
        assert_eq!(*modes[1].centroid(), 10.);
    }

    #[test]
    fn non_convergence_names_lowest_failing_point() {
        // -100 is isolated and settles at once; 5 and 6 drift toward each other
        let points = [-100., 5., 6.];
        let ms = MeanShift::new(Scalar, Gaussian::from(1.)).with_iterations(1);
        let expected = Err(Error::NonConvergence {
            point: 1,
            iterations: 1,
        });
        assert_eq!(ms.cluster(&points).map(|m| m.len()), expected);
        assert_eq!(ms.cluster_parallel(&points).map(|m| m.len()), expected);
        assert_eq!(
            ms.cluster_batch(&points, &Parallel::from(Scalar)).map(|m| m.len()),
            expected
        );
        let weighted = points.map(|x| (x, 1.));
        assert_eq!(ms.cluster_weighted(&weighted).map(|m| m.len()), expected);
        assert_eq!(ms.cluster_weighted_parallel(&weighted).map(|m| m.len()), expected);
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = MeanShift::new(Scalar, Flat::from(1.)).cluster(&[]);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn bad_bandwidth_is_rejected() {
        for b in [0., -1., Energy::INFINITY] {
            let result = MeanShift::new(Scalar, Gaussian::from(b)).cluster(&[1.]);
            assert!(matches!(result, Err(Error::InvalidParameter(_))), "bandwidth {}", b);
        }
    }

    #[test]
    fn bad_weights_are_rejected() {
        let ms = MeanShift::new(Scalar, Flat::from(1.));
        for w in [0., -2., Weight::NAN] {
            let result = ms.cluster_weighted(&[(0., 1.), (1., w)]);
            assert!(matches!(result, Err(Error::InvalidParameter(_))), "weight {}", w);
        }
    }

    #[test]
    fn zero_threads_is_rejected() {
        let result = MeanShift::new(Scalar, Flat::from(1.))
            .with_threads(0)
            .cluster_parallel(&[1.]);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn looser_tolerance_stops_sooner() {
        let points = [0., 1., 2., 3.];
        let steps = |ms: &MeanShift<Scalar, Gaussian>| {
            ms.ascend(0, points[0], |y| ms.shift(y, MeanShift::<Scalar, Gaussian>::unit(&points)))
                .unwrap()
                .steps
        };
        let tight = steps(&MeanShift::new(Scalar, Gaussian::from(1.)));
        let loose = steps(&MeanShift::new(Scalar, Gaussian::from(1.)).with_tolerance(1.));
        assert_eq!(loose, 1);
        assert!(tight > loose, "tight {} vs loose {}", tight, loose);
    }

    #[test]
    fn wide_merge_joins_modes() {
        let points = [0., 0.1, 10., 10.1];
        let apart = MeanShift::new(Scalar, Flat::from(1.)).cluster(&points).unwrap();
        let joined = MeanShift::new(Scalar, Flat::from(1.))
            .with_merge(200.)
            .cluster(&points)
            .unwrap();
        assert_eq!(apart.len(), 2);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].mass(), 4.);
        assert!((joined[0].centroid() - 5.05).abs() < 1e-9, "{:?}", joined[0]);
    }

    #[test]
    fn bad_thresholds_are_rejected() {
        for v in [-1., Energy::NAN, Energy::INFINITY] {
            let tolerance = MeanShift::new(Scalar, Flat::from(1.))
                .with_tolerance(v)
                .cluster(&[1.]);
            let merge = MeanShift::new(Scalar, Flat::from(1.))
                .with_merge(v)
                .cluster(&[1.]);
            assert!(matches!(tolerance, Err(Error::InvalidParameter(_))), "tolerance {}", v);
            assert!(matches!(merge, Err(Error::InvalidParameter(_))), "merge {}", v);
        }
    }

    #[test]
    fn rerun_on_centroids_is_idempotent() {
        let ms = MeanShift::new(Scalar, Flat::from(1.));
        let modes = ms.cluster(&[0., 0.1, 10., 10.1, 25., 25.3, 25.6]).unwrap();
        let centroids = modes.iter().map(|m| *m.centroid()).collect::<Vec<_>>();
        for (i, c) in centroids.iter().enumerate() {
            let peak = ms
                .ascend(i, *c, |y| ms.shift(y, MeanShift::<Scalar, Flat>::unit(&centroids)))
                .unwrap();
            assert_eq!(peak.steps, 1, "centroid {} took {} steps", c, peak.steps);
        }
        let again = ms.cluster(&centroids).unwrap();
        assert_eq!(again.len(), modes.len());
        for (a, b) in again.iter().zip(modes.iter()) {
            assert!(Scalar.within(a.centroid(), b.centroid(), 1e-12));
        }
    }
}
