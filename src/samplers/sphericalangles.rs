// std
use std::f64::consts::PI;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::VectorN;
use crate::core::hypersphere::{Float, TWO_PI};
use crate::core::rng::UniformDeviateSource;
use crate::core::sampler::{SampleCounts, Strategy};
use crate::core::sampling::spherical_direction;

/// Uniform angles, *not* uniform points. See the module overview.
#[derive(Debug, Copy, Clone)]
pub struct SphericalAnglesSampler;

impl SphericalAnglesSampler {
    pub fn new(dimension: usize) -> Result<Self> {
        if !Strategy::SphericalAngles.supports(dimension) {
            return Err(Error::UnsupportedDimension {
                strategy: Strategy::SphericalAngles,
                dimension,
            });
        }
        Ok(SphericalAnglesSampler)
    }
    pub fn dimension(&self) -> usize {
        3
    }
    pub fn sample<S: UniformDeviateSource + ?Sized>(
        &self,
        src: &mut S,
        counts: &mut SampleCounts,
    ) -> Result<VectorN> {
        let theta: Float = TWO_PI * src.uniform_float();
        let phi: Float = PI * src.uniform_float();
        counts.accepted += 1;
        Ok(spherical_direction(theta, phi).into())
    }
}
