// std
use std::path::PathBuf;
// command line options
use clap::{Parser, Subcommand};
// logging
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
// hypersphere
use rs_hypersphere::core::config::Config;
use rs_hypersphere::core::error::{Error, Result};
use rs_hypersphere::core::export::{write_grid_image, write_grid_json};
use rs_hypersphere::core::histogram::{HistogramConfig, HistogramGrid, OutOfRange};
use rs_hypersphere::core::parallel::{benchmark, cloud_density, density_histogram, ParallelOptions};
use rs_hypersphere::core::pointfile::{read_point_file, write_point_file};
use rs_hypersphere::core::projection::EqualAreaProjection;
use rs_hypersphere::core::rng::Rng;
use rs_hypersphere::core::sampler::{HypersphereSampler, SampleCounts, SamplerConfig, Strategy};
use strum::IntoEnumIterator;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sample points on hyperspheres and compare how uniform they are.
#[derive(Parser)]
#[command(name = "rs_hypersphere", version)]
struct Cli {
    /// JSON configuration file, command line options take precedence
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
    /// use specified number of threads (0 = all cores)
    #[arg(short = 't', long = "nthreads")]
    nthreads: Option<u8>,
    /// seed of the random number generator
    #[arg(long)]
    seed: Option<u64>,
    /// log debug messages
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write unit vectors to a point file (one point per line)
    Sample {
        #[arg(short, long)]
        strategy: Option<Strategy>,
        #[arg(short, long)]
        dimension: Option<usize>,
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,
        #[arg(long)]
        retry_cap: Option<u64>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Sample the 2-sphere, project and bin the points
    Density {
        #[arg(short, long)]
        strategy: Option<Strategy>,
        #[arg(short = 'n', long, default_value = "1000000")]
        count: u64,
        /// bins per axis
        #[arg(short, long)]
        bins: Option<usize>,
        /// clamp points outside the extent into the edge bins
        #[arg(long)]
        clamp: bool,
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Project and bin the points of a three-dimensional point file
    Project {
        input: PathBuf,
        /// bins per axis
        #[arg(short, long)]
        bins: Option<usize>,
        /// clamp points outside the extent into the edge bins
        #[arg(long)]
        clamp: bool,
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Measure acceptance rate and cost over a range of dimensions
    Benchmark {
        /// strategy to measure, all strategies if omitted
        #[arg(short, long)]
        strategy: Option<Strategy>,
        #[arg(long, default_value = "2")]
        min_dimension: usize,
        #[arg(long, default_value = "10")]
        max_dimension: usize,
        #[arg(short = 'n', long, default_value = "100000")]
        trials: u64,
        #[arg(long)]
        retry_cap: Option<u64>,
    },
}

fn histogram_config(config: &Config, bins: Option<usize>, clamp: bool) -> HistogramConfig {
    let mut histogram = config.histogram;
    if let Some(bins) = bins {
        histogram.bins_x = bins;
        histogram.bins_y = bins;
    }
    if clamp {
        histogram.policy = OutOfRange::Clamp;
    }
    histogram
}

fn write_outputs(grid: &HistogramGrid, json: Option<PathBuf>, image: Option<PathBuf>) -> Result<()> {
    println!(
        "{} points binned, {} dropped, coefficient of variation inside the disc: {}",
        grid.total(),
        grid.dropped(),
        grid.coefficient_of_variation_within(2.0)
            .map(|cv| format!("{:.4}", cv))
            .unwrap_or_else(|| "n/a".to_string())
    );
    if let Some(path) = json {
        write_grid_json(path, grid)?;
    }
    if let Some(path) = image {
        write_grid_image(path, grid)?;
    }
    Ok(())
}

fn run(args: Cli) -> Result<()> {
    let config = Config::load(args.config.as_deref(), args.nthreads, args.seed)?;
    let options = ParallelOptions {
        threads: config.threads,
        progress: true,
        ..ParallelOptions::default()
    };
    match args.command {
        Command::Sample {
            strategy,
            dimension,
            count,
            retry_cap,
            output,
        } => {
            let mut sampler_config: SamplerConfig = config.sampler;
            if let Some(strategy) = strategy {
                sampler_config.strategy = strategy;
            }
            if let Some(dimension) = dimension {
                sampler_config.dimension = dimension;
            }
            if let Some(retry_cap) = retry_cap {
                sampler_config.retry_cap = retry_cap;
            }
            let sampler = HypersphereSampler::create(&sampler_config)?;
            let mut rng = Rng::with_seed(sampler_config.seed);
            let mut counts = SampleCounts::default();
            let cloud = sampler.sample_cloud(count, &mut rng, &mut counts)?;
            write_point_file(&output, &cloud)?;
            info!(
                points = cloud.len(),
                accepted = counts.accepted,
                rejected = counts.rejected,
                "wrote {:?}",
                output
            );
        }
        Command::Density {
            strategy,
            count,
            bins,
            clamp,
            json,
            image,
        } => {
            let mut sampler_config: SamplerConfig = config.sampler;
            sampler_config.dimension = 3;
            if let Some(strategy) = strategy {
                sampler_config.strategy = strategy;
            }
            let histogram = histogram_config(&config, bins, clamp);
            let grid = density_histogram(&sampler_config, &histogram, count, &options)?;
            write_outputs(&grid, json, image)?;
        }
        Command::Project {
            input,
            bins,
            clamp,
            json,
            image,
        } => {
            let cloud = read_point_file(&input)?;
            let histogram = histogram_config(&config, bins, clamp);
            let projection = EqualAreaProjection::new(config.sampler.tolerance);
            let grid = cloud_density(&cloud, &projection, &histogram)?;
            write_outputs(&grid, json, image)?;
        }
        Command::Benchmark {
            strategy,
            min_dimension,
            max_dimension,
            trials,
            retry_cap,
        } => {
            let strategies: Vec<Strategy> = match strategy {
                Some(strategy) => vec![strategy],
                None => Strategy::iter().collect(),
            };
            println!(
                "{:<24} {:>5} {:>12} {:>12} {:>10} {:>10} {:>12}",
                "strategy", "D", "acceptance", "expected", "std.err", "exhausted", "ns/sample"
            );
            for strategy in strategies {
                for dimension in min_dimension..=max_dimension {
                    if !strategy.supports(dimension) {
                        continue;
                    }
                    let mut sampler_config: SamplerConfig = config.sampler;
                    sampler_config.strategy = strategy;
                    sampler_config.dimension = dimension;
                    if let Some(retry_cap) = retry_cap {
                        sampler_config.retry_cap = retry_cap;
                    }
                    let report = benchmark(
                        &sampler_config,
                        trials,
                        &ParallelOptions {
                            progress: false,
                            ..options
                        },
                    )?;
                    println!(
                        "{:<24} {:>5} {:>12.6} {:>12.6} {:>10.6} {:>10} {:>12.1}",
                        report.strategy.to_string(),
                        report.dimension,
                        report.acceptance_rate(),
                        report.expected_acceptance_rate(),
                        report.acceptance_standard_error(),
                        report.exhausted,
                        report.nanos_per_trial()
                    );
                }
            }
        }
    }
    Ok(())
}

fn main() {
    // handle command line options
    let args = Cli::parse();
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("WARNING: logging was already initialized");
    }
    info!(
        "rs_hypersphere version {} [Detected {} cores]",
        VERSION,
        num_cpus::get()
    );
    if let Err(e) = run(args) {
        error!("{}", e);
        if let Error::ExhaustedRetries { .. } = e {
            error!("raise the retry cap or use the gaussian-normalization strategy");
        }
        std::process::exit(1);
    }
}
