// others
use tracing::warn;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::VectorN;
use crate::core::hypersphere::{unit_ball_volume, Float};
use crate::core::rng::UniformDeviateSource;
use crate::core::sampler::{SampleCounts, Strategy};

/// Probability that a uniform point of the cube [-1,1]^D falls into
/// the unit ball.
pub fn box_acceptance_probability(dimension: usize) -> Float {
    unit_ball_volume(dimension) / (2.0 as Float).powi(dimension as i32)
}

#[derive(Debug, Copy, Clone)]
pub struct BoxRejectionSampler {
    dimension: usize,
    retry_cap: u64,
}

impl BoxRejectionSampler {
    pub fn new(dimension: usize, retry_cap: u64) -> Result<Self> {
        if !Strategy::BoxRejection.supports(dimension) {
            return Err(Error::UnsupportedDimension {
                strategy: Strategy::BoxRejection,
                dimension,
            });
        }
        Ok(BoxRejectionSampler {
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
        for _ in 0..self.retry_cap {
            let candidate: VectorN = (0..self.dimension)
                .map(|_| src.uniform_symmetric())
                .collect();
            // the origin has no direction, treat it like a miss
            if candidate.length_squared() <= 1.0 as Float {
                if let Some(v) = candidate.normalize() {
                    counts.accepted += 1;
                    return Ok(v);
                }
            }
            counts.rejected += 1;
        }
        warn!(
            dimension = self.dimension,
            retry_cap = self.retry_cap,
            "box rejection exhausted its retries"
        );
        Err(Error::ExhaustedRetries {
            strategy: Strategy::BoxRejection,
            dimension: self.dimension,
            retries: self.retry_cap,
        })
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use super::*;
    use crate::core::hypersphere::DEFAULT_TOLERANCE;
    use crate::core::rng::Rng;

    #[test]
    fn acceptance_probabilities() {
        assert!((box_acceptance_probability(2) - PI / 4.0).abs() < 1.0e-12);
        assert!((box_acceptance_probability(3) - PI / 6.0).abs() < 1.0e-12);
        assert!(box_acceptance_probability(20) < 1.0e-7);
    }

    #[test]
    fn rejects_low_dimension() {
        assert!(matches!(
            BoxRejectionSampler::new(1, 10),
            Err(Error::UnsupportedDimension { dimension: 1, .. })
        ));
    }

    #[test]
    fn samples_are_normalized() {
        let mut rng = Rng::with_seed(1);
        let mut counts = SampleCounts::default();
        for dimension in 2..9 {
            let sampler = BoxRejectionSampler::new(dimension, 100_000).unwrap();
            for _ in 0..200 {
                let v = sampler.sample(&mut rng, &mut counts).unwrap();
                assert_eq!(v.dimension(), dimension);
                assert!(v.is_unit(DEFAULT_TOLERANCE));
            }
        }
        assert_eq!(counts.accepted, 7 * 200);
        assert!(counts.rejected > 0);
    }

    #[test]
    fn high_dimension_exhausts_retries() {
        let mut rng = Rng::with_seed(2);
        let mut counts = SampleCounts::default();
        let sampler = BoxRejectionSampler::new(60, 1000).unwrap();
        match sampler.sample(&mut rng, &mut counts) {
            Err(Error::ExhaustedRetries {
                strategy,
                dimension,
                retries,
            }) => {
                assert_eq!(strategy, Strategy::BoxRejection);
                assert_eq!(dimension, 60);
                assert_eq!(retries, 1000);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(counts.accepted, 0);
        assert_eq!(counts.rejected, 1000);
    }
}
