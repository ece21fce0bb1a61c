//! Errors reported by samplers, the projection, the histogram and
//! the I/O wrappers around them.

// std
use std::path::PathBuf;
// others
use thiserror::Error;
// hypersphere
use crate::core::hypersphere::Float;
use crate::core::sampler::Strategy;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A rejection sampler did not accept a candidate within its
    /// retry cap. Raise the cap or switch strategy.
    #[error("{strategy} gave up after {retries} candidates in {dimension} dimensions")]
    ExhaustedRetries {
        strategy: Strategy,
        dimension: usize,
        retries: u64,
    },
    /// The strategy can not produce vectors of the requested dimension.
    #[error("{strategy} does not support dimension {dimension}")]
    UnsupportedDimension { strategy: Strategy, dimension: usize },
    /// The equal-area projection was evaluated at the removed pole.
    #[error("projection is singular at z = {z}")]
    SingularPoint { z: Float },
    /// The inverse projection was evaluated outside the disc of radius 2.
    #[error("disc point at radius {radius} lies outside the projection disc")]
    OutsideDisc { radius: Float },
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unexpected text {token:?} at line {line} of {path:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },
    #[error("a worker thread panicked")]
    WorkerPanicked,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
