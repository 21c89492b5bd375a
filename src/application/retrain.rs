//! Retraining job: the single writer of the model.
//!
//! A retrain copies the current snapshot, folds the new batch into the
//! running feature statistics, trains on the normalized batch, evaluates on a
//! hold-out of the most recent samples, persists the result, and only then
//! publishes it to the handle. Scorers keep reading the previous snapshot
//! until the publish.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::handle::ModelHandle;
use super::trainer::{Trainer, DEFAULT_EPOCHS};
use crate::domain::lenient;
use crate::domain::model::{DEFAULT_LEARNING_RATE, DEFAULT_REGULARIZATION};
use crate::domain::{
    compute_metrics, extract, importance, normalize, EdgeModel, FeatureVector, Opportunity,
    TrainingMetrics,
};
use crate::error::{Result, TrainingError};

/// An opportunity paired with whether it paid off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledOpportunity {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub opportunity: Opportunity,
    pub outcome: bool,
}

impl LabeledOpportunity {
    pub fn new(opportunity: Opportunity, outcome: bool) -> Self {
        Self {
            opportunity,
            outcome,
        }
    }

    fn label(&self) -> f64 {
        if self.outcome {
            1.0
        } else {
            0.0
        }
    }
}

/// Settings for a retraining job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrainSettings {
    pub epochs: u32,
    /// Share of each batch (most recent samples) held out for validation.
    pub validation_fraction: f64,
    /// Hyperparameters for a model created from scratch.
    pub learning_rate: f64,
    pub regularization: f64,
}

impl Default for RetrainSettings {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            validation_fraction: 0.2,
            learning_rate: DEFAULT_LEARNING_RATE,
            regularization: DEFAULT_REGULARIZATION,
        }
    }
}

/// Outcome of one retraining run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrainReport {
    pub version: u64,
    pub trained_samples: usize,
    pub validation_samples: usize,
    pub total_training_samples: u64,
    pub metrics: TrainingMetrics,
    pub validation_metrics: Option<TrainingMetrics>,
}

/// Serialises all model writes.
pub struct Retrainer {
    handle: Arc<ModelHandle>,
    trainer: Mutex<Trainer>,
    settings: RetrainSettings,
}

impl Retrainer {
    pub fn new(handle: Arc<ModelHandle>, trainer: Trainer, settings: RetrainSettings) -> Self {
        Self {
            handle,
            trainer: Mutex::new(trainer),
            settings,
        }
    }

    /// Train on `samples`, persist the new model, and publish it.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::NoSamples`] for an empty batch and any store
    /// error from saving. Nothing is published on error.
    pub fn retrain(&self, samples: &[LabeledOpportunity]) -> Result<RetrainReport> {
        if samples.is_empty() {
            return Err(TrainingError::NoSamples.into());
        }

        let mut trainer = self.trainer.lock();
        let mut model = self.base_model();

        let holdout = holdout_len(samples.len(), self.settings.validation_fraction);
        let (train, validation) = samples.split_at(samples.len() - holdout);

        let raw: Vec<FeatureVector> = train.iter().map(|s| extract(&s.opportunity)).collect();
        model.stats.update_all(&raw);

        let features: Vec<FeatureVector> = raw.iter().map(|x| normalize(x, &model.stats)).collect();
        let labels: Vec<f64> = train.iter().map(LabeledOpportunity::label).collect();
        let metrics = trainer.train_batch(&mut model, &features, &labels, self.settings.epochs)?;

        model.validation_metrics = if validation.is_empty() {
            None
        } else {
            Some(evaluate(&model, validation))
        };
        if let Some(validation) = model.validation_metrics {
            if validation.auc < 0.5 {
                warn!(auc = validation.auc, "validation AUC below chance");
            }
        }

        model.feature_importance = importance::compute(&model.weights);
        model.version += 1;

        self.handle.store().save(&model)?;

        let report = RetrainReport {
            version: model.version,
            trained_samples: train.len(),
            validation_samples: validation.len(),
            total_training_samples: model.training_samples,
            metrics,
            validation_metrics: model.validation_metrics,
        };
        self.handle.publish(model);

        info!(
            version = report.version,
            trained = report.trained_samples,
            held_out = report.validation_samples,
            "retrained model"
        );
        Ok(report)
    }

    /// Replace the stored model with an untrained one, keeping the version
    /// sequence monotonic.
    ///
    /// # Errors
    ///
    /// Returns any store error from saving.
    pub fn reset(&self) -> Result<Arc<EdgeModel>> {
        let _writer = self.trainer.lock();
        let next_version = self.handle.current().map_or(0, |m| m.version) + 1;

        let mut model =
            EdgeModel::untrained(self.settings.learning_rate, self.settings.regularization);
        model.version = next_version;

        self.handle.store().save(&model)?;
        info!(version = model.version, "model reset");
        Ok(self.handle.publish(model))
    }

    fn base_model(&self) -> EdgeModel {
        match self.handle.current() {
            Some(current) => (*current).clone(),
            None => EdgeModel::untrained(self.settings.learning_rate, self.settings.regularization),
        }
    }
}

/// Number of trailing samples to hold out. At least one sample is always
/// trained on, and a hold-out needs two samples to be meaningful.
fn holdout_len(total: usize, fraction: f64) -> usize {
    if !(fraction > 0.0 && fraction < 1.0) {
        return 0;
    }
    let holdout = (total as f64 * fraction).floor() as usize;
    if holdout < 2 || holdout >= total {
        0
    } else {
        holdout
    }
}

fn evaluate(model: &EdgeModel, samples: &[LabeledOpportunity]) -> TrainingMetrics {
    let predictions: Vec<f64> = samples
        .iter()
        .map(|s| model.predict(&normalize(&extract(&s.opportunity), &model.stats)))
        .collect();
    let labels: Vec<f64> = samples.iter().map(LabeledOpportunity::label).collect();
    compute_metrics(&predictions, &labels)
}
