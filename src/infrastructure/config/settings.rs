//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all engine settings.
//! Configuration is loaded from an optional TOML file; every section has
//! defaults, and `EDGERANK_MODEL_PATH` overrides the model location.
//!
//! # Example
//!
//! ```no_run
//! use edgerank::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::logging::LoggingConfig;
use super::scorer::ScorerConfig;
use super::store::{StoreConfig, MODEL_PATH_ENV};
use super::trainer::TrainerConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Model file location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Training hyperparameters.
    #[serde(default)]
    pub trainer: TrainerConfig,

    /// Blending thresholds used when scoring.
    #[serde(default)]
    pub scorer: ScorerConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
            if !path.trim().is_empty() {
                self.store.path = Some(path.into());
            }
        }
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let trainer = &self.trainer;
        if !trainer.learning_rate.is_finite() || trainer.learning_rate <= 0.0 {
            return Err(invalid("learning_rate", "must be a positive number"));
        }
        if !trainer.regularization.is_finite() || trainer.regularization < 0.0 {
            return Err(invalid("regularization", "must be 0 or greater"));
        }
        if !(trainer.lr_decay > 0.0 && trainer.lr_decay <= 1.0) {
            return Err(invalid("lr_decay", "must be in (0, 1]"));
        }
        if trainer.epochs == 0 {
            return Err(invalid("epochs", "must be greater than 0"));
        }
        if !(0.0..1.0).contains(&trainer.validation_fraction) {
            return Err(invalid("validation_fraction", "must be in [0, 1)"));
        }

        let scorer = &self.scorer;
        if !scorer.blend_scale.is_finite() || scorer.blend_scale <= 0.0 {
            return Err(invalid("blend_scale", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&scorer.max_ml_weight) {
            return Err(invalid("max_ml_weight", "must be between 0 and 1"));
        }
        if let Some(auc) = scorer.min_validation_auc {
            if !(0.0..=1.0).contains(&auc) {
                return Err(invalid("min_validation_auc", "must be between 0 and 1"));
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
