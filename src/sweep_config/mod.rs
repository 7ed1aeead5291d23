use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::GraphFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read the sweep configuration: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse the sweep configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{files} input files but {counts} ground-truth triangle counts")]
    MisalignedGroundTruth { files: usize, counts: usize },
}

/// Sweep over input graphs and experimental conditions.
///
/// `triangle_count[i]` is the ground truth of `input_files[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfiguration {
    pub input_files: Vec<String>,
    pub triangle_count: Vec<u64>,
    pub algo_names: Vec<String>,
    pub sparsification_prob: Vec<f64>,
    pub seed_count: Vec<usize>,
    #[serde(default = "default_repeats")]
    pub no_of_repeats: usize,
    #[serde(default = "default_subsample_prob")]
    pub subsample_prob: f64,
    #[serde(default)]
    pub degree_bin_seed: bool,
    #[serde(default = "default_true")]
    pub edge_count_available: bool,
    #[serde(default = "default_true")]
    pub print_to_console: bool,
    #[serde(default)]
    pub print_to_file: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub graph_format: GraphFormat,
    #[serde(default)]
    pub snapshot_cache: bool,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub reseed_per_trial: bool,
}

fn default_repeats() -> usize {
    1
}

fn default_subsample_prob() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl SweepConfiguration {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Only the ground-truth alignment is checked. Probabilities and counts
    /// are passed to the kernels as they are.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.input_files.len() != self.triangle_count.len() {
            return Err(ConfigError::MisalignedGroundTruth {
                files: self.input_files.len(),
                counts: self.triangle_count.len(),
            });
        }
        Ok(())
    }
}
