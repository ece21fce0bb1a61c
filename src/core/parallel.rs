//! Multi-threaded sampling.
//!
//! Work is split into batches by a **BatchQueue**. Every batch draws
//! from its own **Rng**, selected by the configured seed and the batch
//! index, so no generator is shared and the result does not depend on
//! the number of threads. Workers send their partial results through a
//! channel and the calling thread reduces them: grids are summed cell
//! by cell, benchmark counts are added up.

// std
use std::convert::TryFrom;
use std::time::Instant;
// others
use rayon::prelude::*;
use tracing::{debug, info};
// hypersphere
use crate::batchqueue::{Batch, BatchQueue};
use crate::core::benchmark::{BenchmarkReport, SamplerBenchmark};
use crate::core::error::{Error, Result};
use crate::core::geometry::{PointCloud, Vector3f, VectorN};
use crate::core::histogram::{HistogramConfig, HistogramGrid};
use crate::core::projection::EqualAreaProjection;
use crate::core::rng::Rng;
use crate::core::sampler::{HypersphereSampler, SampleCounts, SamplerConfig};

const CLOUD_CHUNK: usize = 4096;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParallelOptions {
    /// Worker threads, 0 uses all cores.
    pub threads: u8,
    pub batch_size: u64,
    /// Show a progress bar on stdout.
    pub progress: bool,
}

impl Default for ParallelOptions {
    fn default() -> Self {
        ParallelOptions {
            threads: 0,
            batch_size: 10_000,
            progress: false,
        }
    }
}

pub fn worker_count(threads: u8) -> usize {
    if threads == 0_u8 {
        num_cpus::get()
    } else {
        threads as usize
    }
}

/// Seed of the generator drawing batch *index*.
pub fn batch_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Run *work* on every batch of *queue* and hand each result to
/// *fold* on the calling thread.
fn run_batches<T, W, F>(
    queue: &BatchQueue,
    options: &ParallelOptions,
    work: W,
    mut fold: F,
) -> Result<()>
where
    T: Send,
    W: Fn(Batch) -> Result<T> + Sync,
    F: FnMut(T) -> Result<()>,
{
    let num_cores: usize = worker_count(options.threads);
    info!(
        threads = num_cores,
        batches = queue.len(),
        "sampling with {} thread(s)",
        num_cores
    );
    let work = &work;
    crossbeam::scope(|scope| -> Result<()> {
        let (batch_tx, batch_rx) = crossbeam_channel::bounded(num_cores);
        // spawn worker threads
        for _ in 0..num_cores {
            let batch_tx = batch_tx.clone();
            scope.spawn(move |_| {
                while let Some(batch) = queue.next() {
                    // the receiver is gone once the main thread failed
                    if batch_tx.send(work(batch)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(batch_tx);
        let mut progress = if options.progress {
            Some(pbr::ProgressBar::new(queue.len() as u64))
        } else {
            None
        };
        for result in batch_rx.iter() {
            fold(result?)?;
            if let Some(pb) = progress.as_mut() {
                pb.inc();
            }
        }
        if let Some(pb) = progress.as_mut() {
            pb.finish();
        }
        Ok(())
    })
    .map_err(|_| Error::WorkerPanicked)?
}

/// Sample *samples* points on the 2-sphere, project them and bin
/// them. Points at the removed pole are counted as dropped.
pub fn density_histogram(
    sampler_config: &SamplerConfig,
    histogram_config: &HistogramConfig,
    samples: u64,
    options: &ParallelOptions,
) -> Result<HistogramGrid> {
    if sampler_config.dimension != 3 {
        return Err(Error::DimensionMismatch {
            expected: 3,
            got: sampler_config.dimension,
        });
    }
    let sampler = HypersphereSampler::create(sampler_config)?;
    let projection = EqualAreaProjection::new(sampler_config.tolerance);
    let mut grid = HistogramGrid::new(histogram_config)?;
    let queue = BatchQueue::new(samples, options.batch_size);
    let seed: u64 = sampler_config.seed;
    let work = |batch: Batch| -> Result<HistogramGrid> {
        let mut rng = Rng::with_seed(batch_seed(seed, batch.index));
        let mut counts = SampleCounts::default();
        let mut partial = HistogramGrid::new(histogram_config)?;
        for _ in 0..batch.len {
            let v: VectorN = sampler.sample(&mut rng, &mut counts)?;
            let v = Vector3f::try_from(&v)?;
            match projection.forward(&v) {
                Ok(p) => {
                    partial.add(&p);
                }
                Err(Error::SingularPoint { z }) => {
                    debug!(z, "skipping sample at the pole");
                    partial.mark_dropped();
                }
                Err(e) => return Err(e),
            }
        }
        Ok(partial)
    };
    run_batches(&queue, options, work, |partial| grid.merge(&partial))?;
    info!(
        binned = grid.total(),
        dropped = grid.dropped(),
        "density histogram done"
    );
    Ok(grid)
}

/// Project and bin a three-dimensional point cloud, chunk by chunk
/// on the rayon pool. Points at the removed pole are counted as
/// dropped.
pub fn cloud_density(
    cloud: &PointCloud,
    projection: &EqualAreaProjection,
    histogram_config: &HistogramConfig,
) -> Result<HistogramGrid> {
    if cloud.dimension() != 3 {
        return Err(Error::DimensionMismatch {
            expected: 3,
            got: cloud.dimension(),
        });
    }
    let empty = HistogramGrid::new(histogram_config)?;
    cloud
        .points()
        .par_chunks(CLOUD_CHUNK)
        .map(|chunk| {
            let mut partial = empty.clone();
            for v in chunk {
                match Vector3f::try_from(v).and_then(|v| projection.forward(&v)) {
                    Ok(p) => {
                        partial.add(&p);
                    }
                    Err(Error::SingularPoint { .. }) => partial.mark_dropped(),
                    Err(e) => return Err(e),
                }
            }
            Ok(partial)
        })
        .try_reduce(
            || empty.clone(),
            |mut a, b| {
                a.merge(&b)?;
                Ok(a)
            },
        )
}

/// Benchmark a strategy over *trials* samples spread over worker
/// threads. The reported time is the wall-clock time of the whole
/// run.
pub fn benchmark(
    config: &SamplerConfig,
    trials: u64,
    options: &ParallelOptions,
) -> Result<BenchmarkReport> {
    let bench = SamplerBenchmark::new(config)?;
    let mut report = BenchmarkReport::new(config.strategy, config.dimension);
    let queue = BatchQueue::new(trials, options.batch_size);
    let seed: u64 = config.seed;
    let start = Instant::now();
    let work = |batch: Batch| -> Result<BenchmarkReport> {
        let mut rng = Rng::with_seed(batch_seed(seed, batch.index));
        bench.run_with(batch.len, &mut rng)
    };
    run_batches(&queue, options, work, |partial| report.merge(&partial))?;
    report.elapsed = start.elapsed();
    info!(
        strategy = %report.strategy,
        dimension = report.dimension,
        acceptance_rate = report.acceptance_rate(),
        exhausted = report.exhausted,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "parallel benchmark finished"
    );
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::histogram::{Extent, OutOfRange};
    use crate::core::sampler::Strategy;

    fn options(threads: u8) -> ParallelOptions {
        ParallelOptions {
            threads,
            batch_size: 1000,
            progress: false,
        }
    }

    #[test]
    fn grid_does_not_depend_on_thread_count() {
        let sampler_config = SamplerConfig::new(Strategy::BoxRejection, 3);
        let histogram_config = HistogramConfig::new(8, 8, Extent::disc(), OutOfRange::Drop);
        let one = density_histogram(&sampler_config, &histogram_config, 10_500, &options(1)).unwrap();
        let four =
            density_histogram(&sampler_config, &histogram_config, 10_500, &options(4)).unwrap();
        assert_eq!(one, four);
        assert_eq!(one.seen(), 10_500);
        // the square around the disc holds every projected point
        assert_eq!(one.dropped(), 0);
    }

    #[test]
    fn density_needs_three_dimensions() {
        let sampler_config = SamplerConfig::new(Strategy::GaussianNormalization, 4);
        assert!(matches!(
            density_histogram(
                &sampler_config,
                &HistogramConfig::default(),
                10,
                &options(2)
            ),
            Err(Error::DimensionMismatch {
                expected: 3,
                got: 4
            })
        ));
    }

    #[test]
    fn exhausted_retries_abort_the_density() {
        let mut sampler_config = SamplerConfig::new(Strategy::BoxRejection, 3);
        sampler_config.retry_cap = 1;
        let result = density_histogram(
            &sampler_config,
            &HistogramConfig::default(),
            5000,
            &options(2),
        );
        assert!(matches!(result, Err(Error::ExhaustedRetries { .. })));
    }

    #[test]
    fn parallel_benchmark_sums_batches() {
        let config = SamplerConfig::new(Strategy::BoxRejection, 3);
        let one = benchmark(&config, 5000, &options(1)).unwrap();
        let three = benchmark(&config, 5000, &options(3)).unwrap();
        assert_eq!(one.trials, 5000);
        assert_eq!(one.counts.accepted, 5000);
        assert_eq!(one.counts, three.counts);
        assert_eq!(one.exhausted, 0);
    }

    #[test]
    fn cloud_density_matches_sequential_binning() {
        let sampler =
            HypersphereSampler::create(&SamplerConfig::new(Strategy::InverseEqualArea, 3))
                .unwrap();
        let mut counts = SampleCounts::default();
        let cloud = sampler
            .sample_cloud(10_000, &mut Rng::with_seed(17), &mut counts)
            .unwrap();
        let projection = EqualAreaProjection::default();
        let config = HistogramConfig::new(16, 16, Extent::disc(), OutOfRange::Drop);
        let parallel = cloud_density(&cloud, &projection, &config).unwrap();
        let points = projection.forward_cloud(&cloud).unwrap();
        let sequential = HistogramGrid::build(&points, &config).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn batch_seeds_differ() {
        assert_ne!(batch_seed(0, 1), batch_seed(0, 2));
        assert_eq!(batch_seed(5, 0), 5);
    }
}
