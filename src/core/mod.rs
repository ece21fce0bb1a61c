//! Core types and algorithms: the deviate source, vectors and point
//! clouds, the sampler interface, the equal-area projection, density
//! histograms and the benchmark and parallel drivers built on them.

pub mod benchmark;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod histogram;
pub mod hypersphere;
pub mod parallel;
pub mod pointfile;
pub mod projection;
pub mod rng;
pub mod sampler;
pub mod sampling;
