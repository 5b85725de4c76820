//! Cluster Binary
//!
//! Reads one point per line from stdin and prints one line per cluster:
//! its size, then its centroid. Clusters come out largest first for mean
//! shift, in split order for k-means.
//!
//! Subcommands: kmeans, meanshift. Set `MODAL_LOG=off` to skip logging.
mod args;
mod points;

use args::*;
use clap::Parser;
use modal::geometry::*;
use modal::kernel::*;
use modal::kmeans::KMeans;
use modal::meanshift::*;
use points::*;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if std::env::var("MODAL_LOG").map_or(true, |v| v != "off") {
        modal::core::log()?;
    }
    let input = args.input();
    match (input.colours, input.dim) {
        (true, _) => run(&args, Chroma),
        (false, 1) => run(&args, Scalar),
        (false, 2) => run(&args, Plane::default()),
        (false, _) => run(&args, Space::default()),
    }
}

fn run<G>(args: &Args, geometry: G) -> anyhow::Result<()>
where
    G: Line + Copy,
{
    let points = read(&geometry, std::io::stdin().lock())?;
    log::info!("{:<32}{:<32}", "points loaded", points.len());
    match *args {
        Args::Kmeans { k, .. } => {
            let clusters = KMeans::new(geometry, k).cluster(&points)?;
            log::info!("{:<32}{:<32}", "clusters", clusters.len());
            for cluster in clusters.iter() {
                println!("{:>8}  {}", cluster.len(), geometry.show(cluster.centroid()));
            }
            Ok(())
        }
        Args::Meanshift {
            kernel, bandwidth, ..
        } => match kernel {
            Shape::Flat => modes(args, MeanShift::new(geometry, Flat::from(bandwidth)), &points),
            Shape::Gaussian => modes(args, MeanShift::new(geometry, Gaussian::from(bandwidth)), &points),
        },
    }
}

fn modes<G, K>(args: &Args, ms: MeanShift<G, K>, points: &[G::P]) -> anyhow::Result<()>
where
    G: Line + Copy,
    K: Kernel,
{
    let (strategy, threads) = match *args {
        Args::Meanshift {
            strategy, threads, ..
        } => (strategy, threads),
        Args::Kmeans { .. } => (Strategy::Sequential, None),
    };
    let ms = match threads {
        Some(n) => ms.with_threads(n),
        None => ms,
    };
    let modes = match strategy {
        Strategy::Sequential => ms.cluster(points)?,
        Strategy::Parallel => ms.cluster_parallel(points)?,
        Strategy::Batch => ms.cluster_batch(points, &Parallel::from(*ms.geometry()))?,
    };
    log::info!("{:<32}{:<32}", "modes", modes.len());
    for mode in modes.iter() {
        println!("{:>8}  {}", mode.len(), ms.geometry().show(mode.centroid()));
    }
    Ok(())
}
