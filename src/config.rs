//! Generator configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use crate::analysis::HealthThresholds;
use crate::conditioning::HashAlgorithm;
use crate::entropy::JitterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`VqrTurnRng`](crate::VqrTurnRng).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output bytes served between reseeds.
    pub reseed_interval_bytes: u64,
    /// Bytes drawn from each source per collection cycle.
    pub collection_bytes: usize,
    /// Largest single DRBG draw.
    pub chunk_bytes: usize,
    /// Hash used for seed derivation.
    pub hash: HashAlgorithm,
    /// Jitter loop sizing.
    pub jitter: JitterConfig,
    /// Health test bounds.
    pub health: HealthThresholds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            reseed_interval_bytes: 1 << 20, // 1 MiB
            collection_bytes: 64,
            chunk_bytes: 4096,
            hash: HashAlgorithm::default(),
            jitter: JitterConfig::default(),
            health: HealthThresholds::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a default configuration with the given reseed interval.
    pub fn with_reseed_interval(reseed_interval_bytes: u64) -> Self {
        Self {
            reseed_interval_bytes,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reseed_interval_bytes == 0 {
            return Err(ConfigError::InvalidReseedInterval);
        }
        if self.collection_bytes == 0 {
            return Err(ConfigError::InvalidCollectionSize);
        }
        if self.chunk_bytes == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        if !self.jitter.is_consistent() {
            return Err(ConfigError::InvalidJitterMask(self.jitter.delta_mask_bits));
        }
        if !self.health.is_consistent() {
            return Err(ConfigError::InvalidHealthThresholds);
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("reseed interval must be at least one byte")]
    InvalidReseedInterval,
    #[error("collection size must be at least one byte")]
    InvalidCollectionSize,
    #[error("chunk size must be at least one byte")]
    InvalidChunkSize,
    #[error("jitter delta mask must be 1-64 bits, got {0}")]
    InvalidJitterMask(u32),
    #[error("health thresholds must satisfy min_ones <= max_ones <= window_bits with nonzero run and window")]
    InvalidHealthThresholds,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}
