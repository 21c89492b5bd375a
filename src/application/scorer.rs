//! Opportunity scoring and ranking.
//!
//! The scorer blends the model's probability with the detector's heuristic
//! confidence. The model's share of the blend grows with the number of
//! samples it has been trained on, capped at [`MAX_ML_WEIGHT`]. Below
//! [`MIN_TRAINING_SAMPLES`], or with no model at all, the heuristic passes
//! through unchanged and every opportunity still receives a rank.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::handle::ModelHandle;
use crate::domain::{
    extract, finite_or_zero, normalize, EdgeModel, Opportunity, ScoredOpportunity, ScoringMode,
};

/// Models trained on fewer samples than this are ignored.
pub const MIN_TRAINING_SAMPLES: u64 = 20;

/// Training samples at which the blend weight would reach 1.0 if uncapped.
/// The model's weight is `training_samples / BLEND_SAMPLE_SCALE`.
pub const BLEND_SAMPLE_SCALE: f64 = 200.0;

/// Upper bound on the model's share of the blended confidence. Reached at
/// 120 samples with the default scale.
pub const MAX_ML_WEIGHT: f64 = 0.6;

/// Model score reported when no model contributes.
pub const NEUTRAL_ML_SCORE: f64 = 0.5;

/// Tunables for blending model output with heuristic confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendPolicy {
    pub min_training_samples: u64,
    pub blend_scale: f64,
    pub max_ml_weight: f64,
    /// When set, models whose validation AUC falls below this are ignored.
    pub min_validation_auc: Option<f64>,
}

impl Default for BlendPolicy {
    fn default() -> Self {
        Self {
            min_training_samples: MIN_TRAINING_SAMPLES,
            blend_scale: BLEND_SAMPLE_SCALE,
            max_ml_weight: MAX_ML_WEIGHT,
            min_validation_auc: None,
        }
    }
}

impl BlendPolicy {
    /// Model share of the blend for a model trained on `training_samples`.
    #[must_use]
    pub fn ml_weight(&self, training_samples: u64) -> f64 {
        if self.blend_scale <= 0.0 {
            return self.max_ml_weight;
        }
        (training_samples as f64 / self.blend_scale).min(self.max_ml_weight)
    }

    /// Whether `model` is trusted enough to contribute to scores.
    #[must_use]
    pub fn admits(&self, model: &EdgeModel) -> bool {
        if model.training_samples < self.min_training_samples {
            return false;
        }
        match (self.min_validation_auc, &model.validation_metrics) {
            (Some(threshold), Some(validation)) => validation.auc >= threshold,
            _ => true,
        }
    }
}

/// Observability snapshot of the current model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatus {
    pub available: bool,
    pub version: u64,
    pub training_samples: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub accuracy: f64,
    pub validation_auc: Option<f64>,
    /// Whether the model currently contributes to scores.
    pub blending: bool,
    pub ml_weight: f64,
}

/// Scores and ranks opportunities against the handle's current model.
pub struct Scorer {
    handle: Arc<ModelHandle>,
    policy: BlendPolicy,
}

impl Scorer {
    pub fn new(handle: Arc<ModelHandle>, policy: BlendPolicy) -> Self {
        Self { handle, policy }
    }

    pub fn handle(&self) -> &Arc<ModelHandle> {
        &self.handle
    }

    pub fn policy(&self) -> &BlendPolicy {
        &self.policy
    }

    /// Score one opportunity.
    pub fn score(&self, opportunity: &Opportunity) -> ScoredOpportunity {
        let model = self.handle.current();
        self.score_with(model.as_deref(), opportunity)
    }

    /// Score every opportunity and sort by `rank_score`, highest first.
    ///
    /// The whole batch is scored against one model snapshot. Ties keep their
    /// input order.
    pub fn score_and_rank(&self, opportunities: &[Opportunity]) -> Vec<ScoredOpportunity> {
        let model = self.handle.current();
        let mut scored: Vec<ScoredOpportunity> = opportunities
            .iter()
            .map(|opportunity| self.score_with(model.as_deref(), opportunity))
            .collect();

        scored.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
        scored
    }

    /// Status of the current model for observability collaborators.
    pub fn model_status(&self) -> ModelStatus {
        match self.handle.current() {
            Some(model) => {
                let blending = self.policy.admits(&model);
                ModelStatus {
                    available: true,
                    version: model.version,
                    training_samples: model.training_samples,
                    last_updated: model.last_updated,
                    accuracy: model.metrics.accuracy,
                    validation_auc: model.validation_metrics.map(|m| m.auc),
                    blending,
                    ml_weight: if blending {
                        self.policy.ml_weight(model.training_samples)
                    } else {
                        0.0
                    },
                }
            }
            None => ModelStatus {
                available: false,
                version: 0,
                training_samples: 0,
                last_updated: None,
                accuracy: 0.0,
                validation_auc: None,
                blending: false,
                ml_weight: 0.0,
            },
        }
    }

    fn score_with(&self, model: Option<&EdgeModel>, opportunity: &Opportunity) -> ScoredOpportunity {
        let confidence = finite_or_zero(opportunity.confidence);

        let blended = model
            .filter(|m| self.policy.admits(m))
            .and_then(|m| match blend(m, &self.policy, opportunity, confidence) {
                Some(result) => Some(result),
                None => {
                    warn!(market = %opportunity.market, "model scoring failed, using heuristic");
                    None
                }
            });

        let (ml_score, adjusted_confidence, mode) = match blended {
            Some((ml_score, adjusted)) => (ml_score, adjusted, ScoringMode::Blended),
            None => (NEUTRAL_ML_SCORE, confidence, ScoringMode::HeuristicOnly),
        };

        let expected_value = finite_or_zero(finite_or_zero(opportunity.edge) * adjusted_confidence);
        let rank_score = finite_or_zero(
            expected_value * opportunity.urgency.rank_multiplier() * (0.5 + 0.5 * ml_score),
        );

        debug!(
            market = %opportunity.market,
            ml_score,
            adjusted_confidence,
            expected_value,
            rank_score,
            "scored opportunity"
        );

        ScoredOpportunity {
            opportunity: opportunity.clone(),
            ml_score,
            adjusted_confidence,
            expected_value,
            rank_score,
            mode,
        }
    }
}

/// Model probability and blended confidence, or `None` if either is unusable.
fn blend(
    model: &EdgeModel,
    policy: &BlendPolicy,
    opportunity: &Opportunity,
    confidence: f64,
) -> Option<(f64, f64)> {
    let features = normalize(&extract(opportunity), &model.stats);
    let ml_score = model.predict(&features);
    let ml_weight = policy.ml_weight(model.training_samples);
    let adjusted = (1.0 - ml_weight) * confidence + ml_weight * ml_score;

    (ml_score.is_finite() && adjusted.is_finite()).then_some((ml_score, adjusted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ml_weight_grows_then_caps() {
        let policy = BlendPolicy::default();
        assert!((policy.ml_weight(20) - 0.1).abs() < 1e-12);
        assert!((policy.ml_weight(100) - 0.5).abs() < 1e-12);
        assert_eq!(policy.ml_weight(120), MAX_ML_WEIGHT);
        assert_eq!(policy.ml_weight(10_000), MAX_ML_WEIGHT);
    }

    #[test]
    fn admits_requires_minimum_samples() {
        let policy = BlendPolicy::default();
        let mut model = EdgeModel::default();
        model.training_samples = 19;
        assert!(!policy.admits(&model));
        model.training_samples = 20;
        assert!(policy.admits(&model));
    }

    #[test]
    fn validation_gate_only_applies_when_configured() {
        let mut model = EdgeModel::default();
        model.training_samples = 500;
        model.validation_metrics = Some(crate::domain::TrainingMetrics {
            auc: 0.45,
            ..Default::default()
        });

        assert!(BlendPolicy::default().admits(&model));

        let gated = BlendPolicy {
            min_validation_auc: Some(0.55),
            ..Default::default()
        };
        assert!(!gated.admits(&model));

        model.validation_metrics = None;
        assert!(gated.admits(&model));
    }
}
