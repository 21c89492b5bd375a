//! Feature importance from normalized absolute weights.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::feature::{finite_or_zero, FEATURE_NAMES};
use super::model::ModelWeights;

/// Share of total absolute weight held by one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub importance: f64,
}

/// Rank features by `|w_i| / Σ|w_j|`, most important first.
///
/// When every weight is zero the divisor is taken as 1, so all importances
/// are 0 rather than NaN. Ties keep feature order.
#[must_use]
pub fn compute(weights: &ModelWeights) -> Vec<FeatureImportance> {
    let magnitudes: Vec<f64> = weights
        .weights
        .iter()
        .map(|w| finite_or_zero(*w).abs())
        .collect();

    let total: f64 = magnitudes.iter().sum();
    let total = if total > 0.0 && total.is_finite() {
        total
    } else {
        1.0
    };

    let mut ranked: Vec<FeatureImportance> = FEATURE_NAMES
        .iter()
        .zip(&magnitudes)
        .map(|(name, magnitude)| FeatureImportance {
            name: (*name).to_string(),
            importance: finite_or_zero(magnitude / total),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::NUM_FEATURES;

    #[test]
    fn importances_sum_to_one() {
        let mut weights = ModelWeights::default();
        weights.weights[0] = 0.5;
        weights.weights[3] = -1.5;
        weights.weights[7] = 0.25;

        let ranked = compute(&weights);
        let sum: f64 = ranked.iter().map(|f| f.importance).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert_eq!(ranked.len(), NUM_FEATURES);
    }

    #[test]
    fn sorted_descending_by_magnitude() {
        let mut weights = ModelWeights::default();
        weights.weights[1] = 0.1;
        weights.weights[2] = -0.9;

        let ranked = compute(&weights);
        assert_eq!(ranked[0].name, FEATURE_NAMES[2]);
        assert_eq!(ranked[1].name, FEATURE_NAMES[1]);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].importance >= pair[1].importance));
    }

    #[test]
    fn zero_weights_give_zero_importance() {
        let ranked = compute(&ModelWeights::default());
        assert!(ranked.iter().all(|f| f.importance == 0.0));
        assert_eq!(ranked[0].name, FEATURE_NAMES[0]);
    }
}
