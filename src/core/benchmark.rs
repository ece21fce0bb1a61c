//! Measure how many candidates a strategy needs per sample and how
//! long sampling takes.
//!
//! The report keeps the raw candidate counts next to the derived
//! rates so callers can compute their own confidence intervals.

// std
use std::time::{Duration, Instant};
// others
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::hypersphere::Float;
use crate::core::rng::{Rng, UniformDeviateSource};
use crate::core::sampler::{HypersphereSampler, SampleCounts, SamplerConfig, Strategy};
use crate::samplers::boxrejection::box_acceptance_probability;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub strategy: Strategy,
    pub dimension: usize,
    /// Samples requested.
    pub trials: u64,
    /// Candidates drawn over all trials.
    pub counts: SampleCounts,
    /// Trials that hit the retry cap.
    pub exhausted: u64,
    pub elapsed: Duration,
}

impl BenchmarkReport {
    pub fn new(strategy: Strategy, dimension: usize) -> Self {
        BenchmarkReport {
            strategy,
            dimension,
            trials: 0,
            counts: SampleCounts::default(),
            exhausted: 0,
            elapsed: Duration::default(),
        }
    }
    /// accepted / (accepted + rejected) for rejection sampling, 1.0
    /// for strategies that never reject.
    pub fn acceptance_rate(&self) -> Float {
        if !self.strategy.is_rejection_based() {
            return 1.0 as Float;
        }
        let candidates: u64 = self.counts.candidates();
        if candidates == 0 {
            return 0.0 as Float;
        }
        self.counts.accepted as Float / candidates as Float
    }
    /// Binomial standard error of `acceptance_rate()`.
    pub fn acceptance_standard_error(&self) -> Float {
        let candidates: u64 = self.counts.candidates();
        if !self.strategy.is_rejection_based() || candidates == 0 {
            return 0.0 as Float;
        }
        let p: Float = self.acceptance_rate();
        (p * (1.0 as Float - p) / candidates as Float).sqrt()
    }
    /// The rate `acceptance_rate()` converges to.
    pub fn expected_acceptance_rate(&self) -> Float {
        if self.strategy.is_rejection_based() {
            box_acceptance_probability(self.dimension)
        } else {
            1.0 as Float
        }
    }
    pub fn nanos_per_trial(&self) -> Float {
        if self.trials == 0 {
            return 0.0 as Float;
        }
        self.elapsed.as_nanos() as Float / self.trials as Float
    }
    /// Add the counts of another run of the same strategy and
    /// dimension. Elapsed times are summed.
    pub fn merge(&mut self, other: &BenchmarkReport) -> Result<()> {
        if self.strategy != other.strategy {
            return Err(Error::InvalidConfig(format!(
                "can not merge {} results into {} results",
                other.strategy, self.strategy
            )));
        }
        if self.dimension != other.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                got: other.dimension,
            });
        }
        self.trials += other.trials;
        self.counts += other.counts;
        self.exhausted += other.exhausted;
        self.elapsed += other.elapsed;
        Ok(())
    }
}

pub struct SamplerBenchmark {
    config: SamplerConfig,
    sampler: HypersphereSampler,
}

impl SamplerBenchmark {
    pub fn new(config: &SamplerConfig) -> Result<Self> {
        let sampler = HypersphereSampler::create(config)?;
        Ok(SamplerBenchmark {
            config: *config,
            sampler,
        })
    }
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }
    /// Draw *trials* samples from a generator seeded with the
    /// configured seed.
    pub fn run(&self, trials: u64) -> Result<BenchmarkReport> {
        let mut rng = Rng::with_seed(self.config.seed);
        let report = self.run_with(trials, &mut rng)?;
        info!(
            strategy = %report.strategy,
            dimension = report.dimension,
            trials = report.trials,
            acceptance_rate = report.acceptance_rate(),
            exhausted = report.exhausted,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "benchmark finished"
        );
        Ok(report)
    }
    /// Draw *trials* samples from *src*. Trials that exhaust the
    /// retry cap are counted, not returned as errors.
    pub fn run_with<S: UniformDeviateSource + ?Sized>(
        &self,
        trials: u64,
        src: &mut S,
    ) -> Result<BenchmarkReport> {
        let mut report = BenchmarkReport::new(self.sampler.strategy(), self.sampler.dimension());
        let start = Instant::now();
        for _ in 0..trials {
            match self.sampler.sample(src, &mut report.counts) {
                Ok(_) => {}
                Err(Error::ExhaustedRetries { .. }) => report.exhausted += 1,
                Err(e) => return Err(e),
            }
        }
        report.elapsed = start.elapsed();
        report.trials = trials;
        debug!(
            accepted = report.counts.accepted,
            rejected = report.counts.rejected,
            "benchmark counts"
        );
        Ok(report)
    }
}

/// Benchmark *strategy* in *dimension* dimensions over *trials*
/// samples with the default retry cap and seed.
pub fn run(strategy: Strategy, dimension: usize, trials: u64) -> Result<BenchmarkReport> {
    SamplerBenchmark::new(&SamplerConfig::new(strategy, dimension))?.run(trials)
}
