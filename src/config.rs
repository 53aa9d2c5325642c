//! Predictor configuration
//!
//! Loaded from JSON, with environment overrides for deployment:
//! - `AQI_SEED`: master seed (unset = thread-local entropy)
//! - `AQI_NOISE_MEAN`, `AQI_NOISE_STD_DEV`: noise distribution

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::fs;
use std::path::Path;

/// Mean of the prediction noise term
pub const DEFAULT_NOISE_MEAN: f64 = 50.0;

/// Standard deviation of the prediction noise term
pub const DEFAULT_NOISE_STD_DEV: f64 = 10.0;

/// Normal distribution of the noise term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseParams {
    #[serde(default = "default_mean")]
    pub mean: f64,
    #[serde(default = "default_std_dev")]
    pub std_dev: f64,
}

fn default_mean() -> f64 {
    DEFAULT_NOISE_MEAN
}

fn default_std_dev() -> f64 {
    DEFAULT_NOISE_STD_DEV
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            mean: DEFAULT_NOISE_MEAN,
            std_dev: DEFAULT_NOISE_STD_DEV,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictorConfig {
    #[serde(default)]
    pub noise: NoiseParams,

    /// Master seed for reproducible predictions
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PredictorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read predictor config: {:?}", path))?;

        let config = Self::from_json(&contents)
            .with_context(|| format!("Invalid predictor config: {:?}", path))?;

        tracing::info!(
            "Loaded predictor config from {:?} (noise mean {}, std {}, seed {:?})",
            path,
            config.noise.mean,
            config.noise.std_dev,
            config.seed
        );
        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).with_context(|| "Failed to parse predictor config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.noise.mean.is_finite() {
            anyhow::bail!("Noise mean must be finite, got {}", self.noise.mean);
        }
        if !self.noise.std_dev.is_finite() || self.noise.std_dev < 0.0 {
            anyhow::bail!(
                "Noise std_dev must be finite and non-negative, got {}",
                self.noise.std_dev
            );
        }
        Ok(())
    }

    /// Apply `AQI_SEED`, `AQI_NOISE_MEAN` and `AQI_NOISE_STD_DEV` from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| env_value(key, std::env::var(key)))
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Result<Option<String>>,
    ) -> Result<Self> {
        if let Some(seed) = lookup("AQI_SEED")? {
            self.seed = Some(
                seed.trim()
                    .parse::<u64>()
                    .with_context(|| format!("AQI_SEED is not a u64: '{}'", seed))?,
            );
        }
        if let Some(mean) = lookup("AQI_NOISE_MEAN")? {
            self.noise.mean = mean
                .trim()
                .parse::<f64>()
                .with_context(|| format!("AQI_NOISE_MEAN is not a number: '{}'", mean))?;
        }
        if let Some(std_dev) = lookup("AQI_NOISE_STD_DEV")? {
            self.noise.std_dev = std_dev
                .trim()
                .parse::<f64>()
                .with_context(|| format!("AQI_NOISE_STD_DEV is not a number: '{}'", std_dev))?;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Unset is `None`; a set but non-UTF-8 value is an error, not a silent skip
fn env_value(key: &str, value: Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            anyhow::bail!("{} is not valid UTF-8: {:?}", key, raw)
        }
    }
}
