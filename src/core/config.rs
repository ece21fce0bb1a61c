//! Run configuration, read from a JSON file and overridden from the
//! command line.
//!
//! ```json
//! {
//!   "sampler": { "dimension": 3, "strategy": "box-rejection", "seed": 7 },
//!   "histogram": { "bins_x": 32, "bins_y": 32, "policy": "clamp" },
//!   "threads": 4
//! }
//! ```
//!
//! Missing fields take their default values.

// std
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
// others
use serde::{Deserialize, Serialize};
use tracing::info;
// hypersphere
use crate::core::error::Result;
use crate::core::histogram::HistogramConfig;
use crate::core::sampler::SamplerConfig;

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampler: SamplerConfig,
    pub histogram: HistogramConfig,
    /// Worker threads, 0 uses all cores.
    pub threads: u8,
}

impl Config {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
    /// Configuration from *path* (defaults without one) with the
    /// command line overrides applied, validated as a whole.
    pub fn load(path: Option<&Path>, threads: Option<u8>, seed: Option<u64>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(threads) = threads {
            config.threads = threads;
        }
        if let Some(seed) = seed {
            config.sampler.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()?;
        self.histogram.validate()
    }
}
