//! The **HypersphereSampler** enum not only defines the interface to
//! the sampling strategies but also provides some common
//! functionality for use by them (point clouds, candidate counters,
//! configuration).

// std
use std::ops::{Add, AddAssign};
// others
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::{PointCloud, VectorN};
use crate::core::hypersphere::{Float, DEFAULT_RETRY_CAP, DEFAULT_TOLERANCE};
use crate::core::rng::UniformDeviateSource;
use crate::samplers::boxrejection::BoxRejectionSampler;
use crate::samplers::gaussian::GaussianSampler;
use crate::samplers::inverseequalarea::InverseEqualAreaSampler;
use crate::samplers::sphericalangles::SphericalAnglesSampler;

/// Tag selecting how unit vectors are generated.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Draw from the cube [-1,1]^D, keep points inside the unit
    /// ball and normalize them.
    BoxRejection,
    /// Uniform polar and azimuthal angles. Biased towards both poles
    /// and kept only to show that bias. D = 3 only.
    SphericalAngles,
    /// Normalized vector of D standard normal deviates. Works for
    /// every D and never rejects.
    GaussianNormalization,
    /// Uniform height and azimuth mapped through the inverse
    /// equal-area projection. D = 3 only.
    InverseEqualArea,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::GaussianNormalization
    }
}

impl Strategy {
    pub fn supports(&self, dimension: usize) -> bool {
        match self {
            Strategy::BoxRejection | Strategy::GaussianNormalization => dimension >= 2,
            Strategy::SphericalAngles | Strategy::InverseEqualArea => dimension == 3,
        }
    }
    pub fn is_rejection_based(&self) -> bool {
        matches!(self, Strategy::BoxRejection)
    }
}

/// Candidates drawn by a sampler, split into accepted and rejected.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCounts {
    pub accepted: u64,
    pub rejected: u64,
}

impl SampleCounts {
    pub fn candidates(&self) -> u64 {
        self.accepted + self.rejected
    }
}

impl Add for SampleCounts {
    type Output = SampleCounts;
    fn add(self, rhs: SampleCounts) -> SampleCounts {
        SampleCounts {
            accepted: self.accepted + rhs.accepted,
            rejected: self.rejected + rhs.rejected,
        }
    }
}

impl AddAssign for SampleCounts {
    fn add_assign(&mut self, rhs: SampleCounts) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub dimension: usize,
    pub strategy: Strategy,
    pub seed: u64,
    /// Maximum number of candidates drawn for one sample.
    pub retry_cap: u64,
    /// Tolerance on unit length and on the distance to the removed
    /// pole of the projection.
    pub tolerance: Float,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            dimension: 3,
            strategy: Strategy::default(),
            seed: 0,
            retry_cap: DEFAULT_RETRY_CAP,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SamplerConfig {
    pub fn new(strategy: Strategy, dimension: usize) -> Self {
        SamplerConfig {
            dimension,
            strategy,
            ..SamplerConfig::default()
        }
    }
    pub fn validate(&self) -> Result<()> {
        if !self.strategy.supports(self.dimension) {
            return Err(Error::UnsupportedDimension {
                strategy: self.strategy,
                dimension: self.dimension,
            });
        }
        if self.retry_cap == 0 {
            return Err(Error::InvalidConfig(
                "retry cap must allow at least one candidate".to_string(),
            ));
        }
        if !(self.tolerance > 0.0 as Float) {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum HypersphereSampler {
    BoxRejection(BoxRejectionSampler),
    SphericalAngles(SphericalAnglesSampler),
    GaussianNormalization(GaussianSampler),
    InverseEqualArea(InverseEqualAreaSampler),
}

impl HypersphereSampler {
    pub fn create(config: &SamplerConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            strategy = %config.strategy,
            dimension = config.dimension,
            retry_cap = config.retry_cap,
            "creating sampler"
        );
        let sampler = match config.strategy {
            Strategy::BoxRejection => HypersphereSampler::BoxRejection(
                BoxRejectionSampler::new(config.dimension, config.retry_cap)?,
            ),
            Strategy::SphericalAngles => HypersphereSampler::SphericalAngles(
                SphericalAnglesSampler::new(config.dimension)?,
            ),
            Strategy::GaussianNormalization => HypersphereSampler::GaussianNormalization(
                GaussianSampler::new(config.dimension, config.retry_cap)?,
            ),
            Strategy::InverseEqualArea => HypersphereSampler::InverseEqualArea(
                InverseEqualAreaSampler::new(config.dimension, config.tolerance)?,
            ),
        };
        Ok(sampler)
    }
    pub fn strategy(&self) -> Strategy {
        match self {
            HypersphereSampler::BoxRejection(_) => Strategy::BoxRejection,
            HypersphereSampler::SphericalAngles(_) => Strategy::SphericalAngles,
            HypersphereSampler::GaussianNormalization(_) => Strategy::GaussianNormalization,
            HypersphereSampler::InverseEqualArea(_) => Strategy::InverseEqualArea,
        }
    }
    pub fn dimension(&self) -> usize {
        match self {
            HypersphereSampler::BoxRejection(sampler) => sampler.dimension(),
            HypersphereSampler::SphericalAngles(sampler) => sampler.dimension(),
            HypersphereSampler::GaussianNormalization(sampler) => sampler.dimension(),
            HypersphereSampler::InverseEqualArea(sampler) => sampler.dimension(),
        }
    }
    pub fn is_rejection_based(&self) -> bool {
        self.strategy().is_rejection_based()
    }
    /// Draw one unit vector, adding the candidates it took to *counts*.
    pub fn sample<S: UniformDeviateSource + ?Sized>(
        &self,
        src: &mut S,
        counts: &mut SampleCounts,
    ) -> Result<VectorN> {
        match self {
            HypersphereSampler::BoxRejection(sampler) => sampler.sample(src, counts),
            HypersphereSampler::SphericalAngles(sampler) => sampler.sample(src, counts),
            HypersphereSampler::GaussianNormalization(sampler) => sampler.sample(src, counts),
            HypersphereSampler::InverseEqualArea(sampler) => sampler.sample(src, counts),
        }
    }
    /// Draw *n* unit vectors. The first failing sample aborts the
    /// whole cloud.
    pub fn sample_cloud<S: UniformDeviateSource + ?Sized>(
        &self,
        n: usize,
        src: &mut S,
        counts: &mut SampleCounts,
    ) -> Result<PointCloud> {
        let mut points: Vec<VectorN> = Vec::with_capacity(n);
        for _ in 0..n {
            points.push(self.sample(src, counts)?);
        }
        PointCloud::new(self.dimension(), points)
    }
}

/// Draw one unit vector in *dimension* dimensions with *strategy*
/// and the default retry cap.
pub fn sample_unit_vector<S: UniformDeviateSource + ?Sized>(
    dimension: usize,
    strategy: Strategy,
    src: &mut S,
) -> Result<VectorN> {
    let sampler = HypersphereSampler::create(&SamplerConfig::new(strategy, dimension))?;
    let mut counts = SampleCounts::default();
    sampler.sample(src, &mut counts)
}
