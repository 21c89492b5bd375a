//! Versioned on-disk schema for the model aggregate.
//!
//! Decoding is deliberately lenient so that records written by older or
//! slightly different builds still load: every field defaults when missing,
//! `null` or non-numeric values decode as 0, and vectors of the wrong width
//! are padded or truncated to [`NUM_FEATURES`]. Only a record from a newer
//! schema is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::lenient;
use crate::domain::model::{DEFAULT_LEARNING_RATE, DEFAULT_REGULARIZATION};
use crate::domain::{
    finite_or_zero, EdgeModel, FeatureImportance, FeatureStats, ModelWeights, TrainingMetrics,
    NUM_FEATURES,
};
use crate::error::StoreError;

/// Schema written by this build.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRecord {
    #[serde(deserialize_with = "lenient::small_count")]
    pub schema_version: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub version: u64,
    pub weights: WeightsRecord,
    pub stats: StatsRecord,
    pub metrics: MetricsRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_metrics: Option<MetricsRecord>,
    #[serde(deserialize_with = "lenient::count")]
    pub training_samples: u64,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
    pub feature_importance: Vec<ImportanceRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsRecord {
    #[serde(deserialize_with = "lenient::float_vec")]
    pub weights: Vec<f64>,
    #[serde(deserialize_with = "lenient::float")]
    pub bias: f64,
    #[serde(deserialize_with = "lenient::opt_float")]
    pub learning_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_float")]
    pub regularization: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsRecord {
    #[serde(deserialize_with = "lenient::count")]
    pub count: u64,
    #[serde(deserialize_with = "lenient::count_vec")]
    pub dim_counts: Vec<u64>,
    #[serde(deserialize_with = "lenient::float_vec")]
    pub means: Vec<f64>,
    #[serde(deserialize_with = "lenient::float_vec")]
    pub stds: Vec<f64>,
    #[serde(deserialize_with = "lenient::float_vec")]
    pub mins: Vec<f64>,
    #[serde(deserialize_with = "lenient::float_vec")]
    pub maxs: Vec<f64>,
    #[serde(deserialize_with = "lenient::float_vec")]
    pub m2s: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsRecord {
    #[serde(deserialize_with = "lenient::small_count")]
    pub epoch: u32,
    #[serde(deserialize_with = "lenient::float")]
    pub loss: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub accuracy: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub precision: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub recall: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub f1: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub auc: f64,
}

impl Default for MetricsRecord {
    fn default() -> Self {
        TrainingMetrics::default().into()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::float")]
    pub importance: f64,
}

impl From<TrainingMetrics> for MetricsRecord {
    fn from(m: TrainingMetrics) -> Self {
        Self {
            epoch: m.epoch,
            loss: m.loss,
            accuracy: m.accuracy,
            precision: m.precision,
            recall: m.recall,
            f1: m.f1,
            auc: m.auc,
        }
    }
}

impl From<MetricsRecord> for TrainingMetrics {
    fn from(r: MetricsRecord) -> Self {
        Self {
            epoch: r.epoch,
            loss: r.loss,
            accuracy: r.accuracy,
            precision: r.precision,
            recall: r.recall,
            f1: r.f1,
            auc: r.auc,
        }
    }
}

impl From<&EdgeModel> for ModelRecord {
    fn from(model: &EdgeModel) -> Self {
        let stats = &model.stats;
        Self {
            schema_version: SCHEMA_VERSION,
            version: model.version,
            weights: WeightsRecord {
                weights: model.weights.weights.to_vec(),
                bias: model.weights.bias,
                learning_rate: Some(model.weights.learning_rate),
                regularization: Some(model.weights.regularization),
            },
            stats: StatsRecord {
                count: stats.count,
                dim_counts: stats.dim_counts.to_vec(),
                means: stats.means.to_vec(),
                stds: stats.stds.to_vec(),
                mins: stats.mins.to_vec(),
                maxs: stats.maxs.to_vec(),
                m2s: stats.m2s.to_vec(),
            },
            metrics: model.metrics.into(),
            validation_metrics: model.validation_metrics.map(Into::into),
            training_samples: model.training_samples,
            last_updated: model.last_updated,
            feature_importance: model
                .feature_importance
                .iter()
                .map(|f| ImportanceRecord {
                    name: f.name.clone(),
                    importance: f.importance,
                })
                .collect(),
        }
    }
}

impl ModelRecord {
    /// Convert into the domain aggregate, repairing anything out of shape.
    pub fn into_model(self) -> EdgeModel {
        let w = self.weights;
        let weights = ModelWeights {
            weights: fit_width(&w.weights, "weights"),
            bias: w.bias,
            learning_rate: w
                .learning_rate
                .filter(|r| *r >= 0.0)
                .unwrap_or(DEFAULT_LEARNING_RATE),
            regularization: w
                .regularization
                .filter(|r| *r >= 0.0)
                .unwrap_or(DEFAULT_REGULARIZATION),
        };

        let s = self.stats;
        let dim_counts = if s.dim_counts.is_empty() {
            [s.count; NUM_FEATURES]
        } else {
            fit_width_u64(&s.dim_counts)
        };
        let stds = fit_width(&s.stds, "stats.stds");
        let m2s = if s.m2s.is_empty() {
            // Older records only kept the standard deviation.
            let mut m2s = [0.0; NUM_FEATURES];
            for (i, m2) in m2s.iter_mut().enumerate() {
                *m2 = stds[i] * stds[i] * dim_counts[i].saturating_sub(1) as f64;
            }
            m2s
        } else {
            fit_width(&s.m2s, "stats.m2s")
        };
        let stats = FeatureStats {
            count: s.count,
            dim_counts,
            means: fit_width(&s.means, "stats.means"),
            stds,
            mins: fit_width(&s.mins, "stats.mins"),
            maxs: fit_width(&s.maxs, "stats.maxs"),
            m2s,
        };

        EdgeModel {
            version: self.version,
            weights,
            stats,
            metrics: self.metrics.into(),
            validation_metrics: self.validation_metrics.map(Into::into),
            training_samples: self.training_samples,
            last_updated: self.last_updated,
            feature_importance: self
                .feature_importance
                .into_iter()
                .map(|f| FeatureImportance {
                    name: f.name,
                    importance: f.importance,
                })
                .collect(),
        }
    }
}

/// Serialise a model to pretty JSON.
pub fn encode(model: &EdgeModel) -> Result<String, StoreError> {
    serde_json::to_string_pretty(&ModelRecord::from(model)).map_err(StoreError::Encode)
}

/// Decode a model from JSON text.
///
/// # Errors
///
/// Fails on malformed JSON and on records from a newer schema.
pub fn decode(content: &str) -> Result<EdgeModel, StoreError> {
    let record: ModelRecord = serde_json::from_str(content).map_err(StoreError::Decode)?;
    if record.schema_version > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: record.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(record.into_model())
}

fn fit_width(values: &[f64], field: &'static str) -> [f64; NUM_FEATURES] {
    if !values.is_empty() && values.len() != NUM_FEATURES {
        warn!(
            field,
            found = values.len(),
            expected = NUM_FEATURES,
            "model record width mismatch"
        );
    }
    let mut out = [0.0; NUM_FEATURES];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = finite_or_zero(*value);
    }
    out
}

fn fit_width_u64(values: &[u64]) -> [u64; NUM_FEATURES] {
    let mut out = [0; NUM_FEATURES];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
    out
}
