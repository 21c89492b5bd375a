//! Scorer blending configuration.

use serde::{Deserialize, Serialize};

use crate::application::scorer::{BLEND_SAMPLE_SCALE, MAX_ML_WEIGHT, MIN_TRAINING_SAMPLES};
use crate::application::BlendPolicy;

/// Controls when and how strongly the model enters the confidence blend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScorerConfig {
    /// Models trained on fewer samples are ignored.
    #[serde(default = "default_min_training_samples")]
    pub min_training_samples: u64,
    /// Sample count at which the model weight reaches its ceiling.
    #[serde(default = "default_blend_scale")]
    pub blend_scale: f64,
    /// Ceiling on the model's share of the blended confidence.
    #[serde(default = "default_max_ml_weight")]
    pub max_ml_weight: f64,
    /// Optional hold-out AUC floor below which the model is ignored.
    #[serde(default)]
    pub min_validation_auc: Option<f64>,
}

const fn default_min_training_samples() -> u64 {
    MIN_TRAINING_SAMPLES
}

const fn default_blend_scale() -> f64 {
    BLEND_SAMPLE_SCALE
}

const fn default_max_ml_weight() -> f64 {
    MAX_ML_WEIGHT
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            min_training_samples: default_min_training_samples(),
            blend_scale: default_blend_scale(),
            max_ml_weight: default_max_ml_weight(),
            min_validation_auc: None,
        }
    }
}

impl From<&ScorerConfig> for BlendPolicy {
    fn from(config: &ScorerConfig) -> Self {
        Self {
            min_training_samples: config.min_training_samples,
            blend_scale: config.blend_scale,
            max_ml_weight: config.max_ml_weight,
            min_validation_auc: config.min_validation_auc,
        }
    }
}
