//! Cross-strategy equivalence over 1-D and 2-D fixtures.
//!
//! Sequential, parallel, and batch climbs share their arithmetic, so they
//! must agree on every mode. Weighted input must agree with the same input
//! expanded into repeated points.
use super::*;
use modal_core::*;
use modal_geometry::*;
use modal_kernel::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const TOLERANCE: Energy = 1e-6;

fn lines() -> Vec<Vec<f64>> {
    let ref mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    let clumps = [0., 5., 20.]
        .into_iter()
        .flat_map(|c| std::iter::repeat_n(c, 10))
        .map(|c| c + rng.random_range(-0.5f64..0.5f64))
        .collect();
    vec![
        vec![0., 0.1, 10., 10.1],
        vec![1., 2., 3., 4., 5., 20., 21., 22.],
        clumps,
    ]
}

fn planes() -> Vec<Vec<[f32; 2]>> {
    [1u64, 2, 3]
        .into_iter()
        .map(|seed| {
            let ref mut rng = SmallRng::seed_from_u64(seed);
            [[0f32, 0.], [14., 0.], [7., 12.]]
                .into_iter()
                .flat_map(|c| std::iter::repeat_n(c, 15))
                .map(|[x, y]| {
                    [
                        x + rng.random_range(-1f32..1f32),
                        y + rng.random_range(-1f32..1f32),
                    ]
                })
                .collect()
        })
        .collect()
}

/// Attaches small integer multiplicities.
fn weigh<P: Copy>(points: &[P], seed: u64) -> Vec<(P, Weight)> {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    points
        .iter()
        .map(|p| (*p, rng.random_range(1..=4) as Weight))
        .collect()
}

/// Repeats each point by its multiplicity.
fn expand<P: Copy>(points: &[(P, Weight)]) -> Vec<P> {
    points
        .iter()
        .flat_map(|(p, w)| std::iter::repeat_n(*p, *w as usize))
        .collect()
}

fn equivalent<G: Geometry>(g: &G, a: &[Mode<G::P>], b: &[Mode<G::P>]) {
    assert_eq!(a.len(), b.len(), "mode counts differ");
    for (x, y) in a.iter().zip(b.iter()) {
        assert!(
            g.within(x.centroid(), y.centroid(), TOLERANCE),
            "{:?} ≠ {:?}",
            x.centroid(),
            y.centroid()
        );
        assert_eq!(x.mass(), y.mass(), "masses differ at {:?}", x.centroid());
    }
}

fn strategies<G, K>(ms: &MeanShift<G, K>, points: &[G::P])
where
    G: Geometry + Copy,
    K: Kernel,
{
    let sequential = ms.cluster(points).unwrap();
    let parallel = ms.cluster_parallel(points).unwrap();
    let batch = ms
        .cluster_batch(points, &Parallel::from(*ms.geometry()))
        .unwrap();
    equivalent(ms.geometry(), &sequential, &parallel);
    equivalent(ms.geometry(), &sequential, &batch);
}

#[test]
fn strategies_agree_on_lines() {
    for points in lines() {
        strategies(&MeanShift::new(Scalar, Flat::from(1.)), &points);
        strategies(&MeanShift::new(Scalar, Gaussian::from(1.)), &points);
    }
}

#[test]
fn strategies_agree_on_planes() {
    for points in planes() {
        strategies(&MeanShift::new(Plane::default(), Flat::from(1.5)), &points);
        strategies(&MeanShift::new(Plane::default(), Gaussian::from(1.)), &points);
    }
}

#[test]
fn dedicated_pool_agrees_with_global() {
    for points in planes() {
        let ms = MeanShift::new(Plane::default(), Gaussian::from(1.));
        let global = ms.cluster_parallel(&points).unwrap();
        let local = MeanShift::new(Plane::default(), Gaussian::from(1.))
            .with_threads(3)
            .cluster_parallel(&points)
            .unwrap();
        equivalent(&Plane::default(), &global, &local);
    }
}

#[test]
fn gaussian_blobs_yield_one_mode_each() {
    for points in planes() {
        let modes = MeanShift::new(Plane::default(), Gaussian::from(1.))
            .cluster(&points)
            .unwrap();
        assert_eq!(modes.len(), 3, "{:?}", modes.iter().map(Mode::centroid).collect::<Vec<_>>());
        assert!(modes.iter().all(|m| m.len() == 15));
    }
}

#[test]
fn weighted_matches_duplicated_on_lines() {
    let weighted = [(0., 3.), (0.2, 1.), (10., 2.), (10.4, 2.)];
    let ms = MeanShift::new(Scalar, Gaussian::from(1.));
    let a = ms.cluster_weighted(&weighted).unwrap();
    let b = ms.cluster(&expand(&weighted)).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a[0].len(), 2);
    assert_eq!(b[0].len(), 4);
    equivalent(&Scalar, &a, &b);
}

#[test]
fn weighted_matches_duplicated_on_planes() {
    for (seed, points) in planes().into_iter().enumerate() {
        let weighted = weigh(&points, seed as u64);
        let ms = MeanShift::new(Plane::default(), Gaussian::from(1.));
        let a = ms.cluster_weighted(&weighted).unwrap();
        let b = ms.cluster(&expand(&weighted)).unwrap();
        equivalent(&Plane::default(), &a, &b);
    }
}

#[test]
fn weighted_parallel_matches_weighted() {
    for (seed, points) in planes().into_iter().enumerate() {
        let weighted = weigh(&points, seed as u64);
        let ms = MeanShift::new(Plane::default(), Gaussian::from(1.));
        let a = ms.cluster_weighted(&weighted).unwrap();
        let b = ms.cluster_weighted_parallel(&weighted).unwrap();
        equivalent(&Plane::default(), &a, &b);
    }
}

#[test]
fn unit_weights_match_unweighted() {
    for points in lines() {
        let ms = MeanShift::new(Scalar, Flat::from(1.));
        let a = ms.cluster(&points).unwrap();
        let b = ms
            .cluster_weighted(&points.iter().map(|p| (*p, 1.)).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.centroid(), y.centroid());
            assert_eq!(x.members(), y.members());
        }
    }
}

#[test]
fn rerun_on_centroids_reproduces_them() {
    for points in planes() {
        let ms = MeanShift::new(Plane::default(), Gaussian::from(1.));
        let modes = ms.cluster(&points).unwrap();
        let centroids = modes.iter().map(|m| *m.centroid()).collect::<Vec<_>>();
        let again = ms.cluster(&centroids).unwrap();
        assert_eq!(again.len(), modes.len());
        for (a, b) in again.iter().zip(modes.iter()) {
            assert!(Plane::default().within(a.centroid(), b.centroid(), TOLERANCE));
        }
    }
}

#[test]
fn weighted_matches_duplicated_when_summits_differ() {
    // each point is alone in its window, so the summits stay apart until merged
    let ms = MeanShift::new(Scalar, Flat::from(1.)).with_merge(4.);
    let weighted = [(0., 3.), (1.5, 1.)];
    let a = ms.cluster_weighted(&weighted).unwrap();
    let b = ms.cluster(&expand(&weighted)).unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].mass(), 4.);
    assert!((a[0].centroid() - 0.375).abs() < 1e-12, "{:?}", a[0]);
    equivalent(&Scalar, &a, &b);
}
