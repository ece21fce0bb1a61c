// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::{DiscPoint, VectorN};
use crate::core::hypersphere::{Float, TWO_PI};
use crate::core::projection::EqualAreaProjection;
use crate::core::rng::UniformDeviateSource;
use crate::core::sampler::{SampleCounts, Strategy};
use crate::core::sampling::disc_point_at_height;

#[derive(Debug, Copy, Clone)]
pub struct InverseEqualAreaSampler {
    projection: EqualAreaProjection,
}

impl InverseEqualAreaSampler {
    pub fn new(dimension: usize, tolerance: Float) -> Result<Self> {
        if !Strategy::InverseEqualArea.supports(dimension) {
            return Err(Error::UnsupportedDimension {
                strategy: Strategy::InverseEqualArea,
                dimension,
            });
        }
        Ok(InverseEqualAreaSampler {
            projection: EqualAreaProjection::new(tolerance),
        })
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
        let z: Float = src.uniform_symmetric();
        let p: DiscPoint = disc_point_at_height(z, theta);
        let v = self.projection.inverse(&p)?;
        counts.accepted += 1;
        Ok(v.into())
    }
}
