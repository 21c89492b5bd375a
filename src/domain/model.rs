//! Logistic model weights and the model aggregate.

use chrono::{DateTime, Utc};

use super::feature::{finite_or_zero, FeatureVector, NUM_FEATURES};
use super::importance::FeatureImportance;
use super::metrics::TrainingMetrics;
use super::stats::FeatureStats;

/// Linear scores are clipped to this magnitude before the sigmoid so the
/// output stays strictly inside `(0, 1)`.
pub const MAX_LOGIT: f64 = 30.0;

/// Default SGD step size for a fresh model.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Default L2 penalty for a fresh model.
pub const DEFAULT_REGULARIZATION: f64 = 0.001;

/// Weight vector, bias, and optimiser hyperparameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWeights {
    pub weights: [f64; NUM_FEATURES],
    pub bias: f64,
    /// Step size. Non-increasing over the model's lifetime.
    pub learning_rate: f64,
    /// L2 penalty applied to weights (never the bias).
    pub regularization: f64,
}

impl ModelWeights {
    /// Zero weights and bias with the given hyperparameters.
    #[must_use]
    pub const fn zeros(learning_rate: f64, regularization: f64) -> Self {
        Self {
            weights: [0.0; NUM_FEATURES],
            bias: 0.0,
            learning_rate,
            regularization,
        }
    }

    /// Whether every weight and the bias are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bias == 0.0 && self.weights.iter().all(|w| *w == 0.0)
    }
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self::zeros(DEFAULT_LEARNING_RATE, DEFAULT_REGULARIZATION)
    }
}

/// Logistic function.
#[inline]
#[must_use]
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Clipped linear score `bias + w·x` with non-finite terms dropped.
#[must_use]
pub fn linear_score(features: &FeatureVector, weights: &ModelWeights) -> f64 {
    let dot: f64 = weights
        .weights
        .iter()
        .zip(features.iter())
        .map(|(w, x)| finite_or_zero(w * x))
        .sum();

    let z = finite_or_zero(weights.bias) + dot;
    if z.is_nan() {
        0.0
    } else {
        z.clamp(-MAX_LOGIT, MAX_LOGIT)
    }
}

/// Probability that an opportunity with `features` pays off.
///
/// Always strictly inside `(0, 1)`. An all-zero model returns exactly 0.5 for
/// any input, finite or not.
#[must_use]
pub fn predict(features: &FeatureVector, weights: &ModelWeights) -> f64 {
    sigmoid(linear_score(features, weights))
}

/// The persisted model aggregate.
///
/// Created untrained, mutated only by the trainer, then published as an
/// immutable snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeModel {
    /// Incremented every time a retrained model is published.
    pub version: u64,
    pub weights: ModelWeights,
    pub stats: FeatureStats,
    /// Metrics from the most recent training call.
    pub metrics: TrainingMetrics,
    /// Metrics on the most recent validation hold-out, if one was used.
    pub validation_metrics: Option<TrainingMetrics>,
    /// Total samples ever trained on. Only the trainer increments it.
    pub training_samples: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub feature_importance: Vec<FeatureImportance>,
}

impl EdgeModel {
    /// A fresh model: zero weights, empty statistics, nothing trained.
    #[must_use]
    pub fn untrained(learning_rate: f64, regularization: f64) -> Self {
        Self {
            version: 0,
            weights: ModelWeights::zeros(learning_rate, regularization),
            stats: FeatureStats::empty(),
            metrics: TrainingMetrics::default(),
            validation_metrics: None,
            training_samples: 0,
            last_updated: None,
            feature_importance: Vec::new(),
        }
    }

    /// Probability for already-normalized features.
    #[must_use]
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        predict(features, &self.weights)
    }

    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.training_samples > 0
    }
}

impl Default for EdgeModel {
    fn default() -> Self {
        Self::untrained(DEFAULT_LEARNING_RATE, DEFAULT_REGULARIZATION)
    }
}
