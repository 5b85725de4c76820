use clap::Parser;
use clap::ValueEnum;
use modal::core::Energy;
use modal::core::KMEANS_DEFAULT_K;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub enum Args {
    #[command(
        about = "Partition stdin points into k clusters by nearest centroid",
        alias = "km"
    )]
    Kmeans {
        #[arg(short, default_value_t = KMEANS_DEFAULT_K)]
        k: usize,
        #[command(flatten)]
        input: Input,
    },
    #[command(
        about = "Find the density modes of stdin points",
        alias = "ms"
    )]
    Meanshift {
        #[arg(long, value_enum, default_value_t = Shape::Gaussian)]
        kernel: Shape,
        #[arg(long, default_value_t = 1.)]
        bandwidth: Energy,
        #[arg(long, value_enum, default_value_t = Strategy::Parallel)]
        strategy: Strategy,
        #[arg(long, help = "Size of a dedicated worker pool")]
        threads: Option<usize>,
        #[command(flatten)]
        input: Input,
    },
}

/// How lines on stdin are read as points.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct Input {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub dim: u8,
    #[arg(long, help = "Read #rrggbb colours instead of coordinates")]
    pub colours: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    Flat,
    Gaussian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Sequential,
    Parallel,
    Batch,
}

impl Args {
    pub fn input(&self) -> Input {
        match self {
            Self::Kmeans { input, .. } => *input,
            Self::Meanshift { input, .. } => *input,
        }
    }
}
