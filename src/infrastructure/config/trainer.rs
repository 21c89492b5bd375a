//! Trainer and retraining job configuration.

use serde::{Deserialize, Serialize};

use crate::application::trainer::{DEFAULT_EPOCHS, DEFAULT_LR_DECAY};
use crate::application::{RetrainSettings, Trainer};
use crate::domain::model::{DEFAULT_LEARNING_RATE, DEFAULT_REGULARIZATION};

/// Hyperparameters for training.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainerConfig {
    /// Initial learning rate for a fresh model.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// L2 penalty applied to weights (not the bias).
    #[serde(default = "default_regularization")]
    pub regularization: f64,
    /// Multiplier applied to the learning rate once per epoch.
    #[serde(default = "default_lr_decay")]
    pub lr_decay: f64,
    #[serde(default = "default_epochs")]
    pub epochs: u32,
    /// Fixed shuffle seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Trailing share of each retraining batch held out for validation.
    #[serde(default = "default_validation_fraction")]
    pub validation_fraction: f64,
}

const fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

const fn default_regularization() -> f64 {
    DEFAULT_REGULARIZATION
}

const fn default_lr_decay() -> f64 {
    DEFAULT_LR_DECAY
}

const fn default_epochs() -> u32 {
    DEFAULT_EPOCHS
}

const fn default_validation_fraction() -> f64 {
    0.2
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            regularization: default_regularization(),
            lr_decay: default_lr_decay(),
            epochs: default_epochs(),
            seed: None,
            validation_fraction: default_validation_fraction(),
        }
    }
}

impl TrainerConfig {
    /// Build a trainer with this decay and seed.
    #[must_use]
    pub fn trainer(&self) -> Trainer {
        Trainer::new(self.lr_decay, self.seed)
    }
}

impl From<&TrainerConfig> for RetrainSettings {
    fn from(config: &TrainerConfig) -> Self {
        Self {
            epochs: config.epochs,
            validation_fraction: config.validation_fraction,
            learning_rate: config.learning_rate,
            regularization: config.regularization,
        }
    }
}
