// others
use tracing::warn;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::VectorN;
use crate::core::hypersphere::Float;
use crate::core::rng::UniformDeviateSource;
use crate::core::sampler::{SampleCounts, Strategy};
use crate::core::sampling::standard_normal_pair;

#[derive(Debug, Copy, Clone)]
pub struct GaussianSampler {
    dimension: usize,
    retry_cap: u64,
}

impl GaussianSampler {
    pub fn new(dimension: usize, retry_cap: u64) -> Result<Self> {
        if !Strategy::GaussianNormalization.supports(dimension) {
            return Err(Error::UnsupportedDimension {
                strategy: Strategy::GaussianNormalization,
                dimension,
            });
        }
        Ok(GaussianSampler {
            dimension,
            retry_cap,
        })
    }
    pub fn dimension(&self) -> usize {
        self.dimension
    }
    pub fn sample<S: UniformDeviateSource + ?Sized>(
        &self,
        src: &mut S,
        counts: &mut SampleCounts,
    ) -> Result<VectorN> {
        let mut c: Vec<Float> = Vec::with_capacity(self.dimension + 1);
        // an all-zero draw has probability zero, but it can not be
        // normalized, so it is redrawn under the same cap
        for _ in 0..self.retry_cap {
            c.clear();
            while c.len() < self.dimension {
                let (a, b) = standard_normal_pair(src);
                c.push(a);
                c.push(b);
            }
            c.truncate(self.dimension);
            if let Some(v) = VectorN::from_slice(&c).normalize() {
                counts.accepted += 1;
                return Ok(v);
            }
        }
        warn!(
            dimension = self.dimension,
            "gaussian normalization drew only zero vectors"
        );
        Err(Error::ExhaustedRetries {
            strategy: Strategy::GaussianNormalization,
            dimension: self.dimension,
            retries: self.retry_cap,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::hypersphere::DEFAULT_TOLERANCE;
    use crate::core::rng::Rng;

    #[test]
    fn unit_vectors_in_many_dimensions() {
        let mut rng = Rng::with_seed(4);
        let mut counts = SampleCounts::default();
        for dimension in &[2_usize, 3, 5, 16, 100, 500] {
            let sampler = GaussianSampler::new(*dimension, 10).unwrap();
            for _ in 0..50 {
                let v = sampler.sample(&mut rng, &mut counts).unwrap();
                assert_eq!(v.dimension(), *dimension);
                assert!(v.is_unit(DEFAULT_TOLERANCE));
            }
        }
        assert_eq!(counts.rejected, 0);
    }

    #[test]
    fn coordinates_are_centered() {
        // every coordinate of a uniform point has mean zero and
        // second moment 1/D
        let dimension: usize = 4;
        let sampler = GaussianSampler::new(dimension, 10).unwrap();
        let mut rng = Rng::with_seed(8);
        let mut counts = SampleCounts::default();
        let n: usize = 20_000;
        let mut mean = vec![0.0 as Float; dimension];
        let mut second = vec![0.0 as Float; dimension];
        for _ in 0..n {
            let v = sampler.sample(&mut rng, &mut counts).unwrap();
            for i in 0..dimension {
                mean[i] += v[i] / n as Float;
                second[i] += v[i] * v[i] / n as Float;
            }
        }
        for i in 0..dimension {
            assert!(mean[i].abs() < 0.02, "mean[{}] = {}", i, mean[i]);
            assert!((second[i] - 0.25).abs() < 0.02, "second[{}] = {}", i, second[i]);
        }
    }
}
