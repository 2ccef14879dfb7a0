//! Detector and simulation configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on trials per check.
pub const MAX_TRIALS: u32 = 64;

/// Configuration for the combined check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Independent trials that must all be positive.
    ///
    /// Each trial's false-positive rate is around 2^-62, so four trials
    /// put the combined rate near 2^-248, assuming independent draws.
    pub trials: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { trials: 4 }
    }
}

impl DetectorConfig {
    /// Creates a configuration with the given trial count.
    pub fn with_trials(trials: u32) -> Self {
        Self { trials }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 || self.trials > MAX_TRIALS {
            return Err(ConfigError::InvalidTrials(self.trials));
        }
        Ok(())
    }
}

/// Configuration for detection-rate simulations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Single trials to run.
    pub runs: u64,
    /// Seed for simulated sources; fresh OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::InvalidRuns);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Trial count outside 1..=64.
    #[error("invalid trial count {0} (must be 1-64)")]
    InvalidTrials(u32),
    /// Simulation asked for zero runs.
    #[error("simulation runs must be positive")]
    InvalidRuns,
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[detector]` section.
    #[serde(default)]
    pub detector: DetectorConfig,
    /// `[simulation]` section.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.detector.validate()?;
        config.simulation.validate()?;
        Ok(config)
    }
}
