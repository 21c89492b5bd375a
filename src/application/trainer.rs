//! Mini-epoch SGD trainer for the logistic edge model.
//!
//! Each call runs `epochs` passes over the batch in a freshly shuffled order,
//! taking one L2-regularized gradient step per sample. The learning rate is
//! decayed once per epoch after the call completes, and the decay persists on
//! the model, so the rate never increases over the model's lifetime.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::domain::{compute_metrics, finite_or_zero, predict, EdgeModel, FeatureVector, TrainingMetrics};
use crate::error::TrainingError;

/// Default multiplicative learning-rate decay applied per epoch.
pub const DEFAULT_LR_DECAY: f64 = 0.99;

/// Default number of passes per training call.
pub const DEFAULT_EPOCHS: u32 = 10;

/// Stochastic gradient descent trainer.
///
/// Owns the shuffling RNG so that a seeded trainer is fully reproducible.
pub struct Trainer {
    lr_decay: f64,
    rng: StdRng,
}

impl Trainer {
    /// Create a trainer with the given per-epoch learning-rate decay.
    ///
    /// Decay factors outside `(0, 1]` are replaced with [`DEFAULT_LR_DECAY`].
    /// A `seed` makes epoch shuffles deterministic.
    #[must_use]
    pub fn new(lr_decay: f64, seed: Option<u64>) -> Self {
        let lr_decay = if lr_decay > 0.0 && lr_decay <= 1.0 {
            lr_decay
        } else {
            DEFAULT_LR_DECAY
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { lr_decay, rng }
    }

    /// Train `model` in place on a labeled batch.
    ///
    /// Labels must be exactly 0 or 1. An empty batch is a no-op that returns
    /// the model's current metrics. `epochs` below 1 is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::LengthMismatch`] when `features` and `labels`
    /// differ in length and [`TrainingError::InvalidLabel`] for a label that
    /// is not 0 or 1. The model is untouched on error.
    pub fn train_batch(
        &mut self,
        model: &mut EdgeModel,
        features: &[FeatureVector],
        labels: &[f64],
        epochs: u32,
    ) -> Result<TrainingMetrics, TrainingError> {
        if features.len() != labels.len() {
            return Err(TrainingError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if let Some(index) = labels.iter().position(|y| *y != 0.0 && *y != 1.0) {
            return Err(TrainingError::InvalidLabel { index });
        }
        if features.is_empty() {
            return Ok(model.metrics);
        }

        let epochs = epochs.max(1);
        let samples: Vec<FeatureVector> = features.iter().map(sanitize).collect();
        let mut order: Vec<usize> = (0..samples.len()).collect();

        for epoch in 0..epochs {
            order.shuffle(&mut self.rng);
            for &i in &order {
                step(model, &samples[i], labels[i]);
            }
            debug!(epoch, learning_rate = model.weights.learning_rate, "epoch complete");
        }

        model.weights.learning_rate *= self.lr_decay.powi(epochs as i32);
        model.training_samples += samples.len() as u64;
        model.last_updated = Some(Utc::now());

        let predictions: Vec<f64> = samples.iter().map(|x| model.predict(x)).collect();
        let metrics = compute_metrics(&predictions, labels).with_epoch(epochs);
        model.metrics = metrics;

        info!(
            samples = samples.len(),
            epochs,
            total_samples = model.training_samples,
            loss = metrics.loss,
            accuracy = metrics.accuracy,
            auc = metrics.auc,
            "trained batch"
        );

        Ok(metrics)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(DEFAULT_LR_DECAY, None)
    }
}

fn sanitize(x: &FeatureVector) -> FeatureVector {
    let mut values = *x.as_array();
    for value in &mut values {
        *value = finite_or_zero(*value);
    }
    FeatureVector::new(values)
}

/// One SGD step. Any update that would leave a parameter non-finite is skipped
/// for that parameter.
fn step(model: &mut EdgeModel, x: &FeatureVector, label: f64) {
    let weights = &mut model.weights;
    let error = predict(x, weights) - label;
    let lr = weights.learning_rate;
    let lambda = weights.regularization;

    for (w, xi) in weights.weights.iter_mut().zip(x.iter()) {
        let gradient = error * xi + lambda * *w;
        let updated = *w - lr * gradient;
        if updated.is_finite() {
            *w = updated;
        }
    }

    let bias = weights.bias - lr * error;
    if bias.is_finite() {
        weights.bias = bias;
    }
}
