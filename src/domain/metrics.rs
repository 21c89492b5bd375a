//! Classification metrics over a batch of predictions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Probabilities are clipped to `[PROBABILITY_CLIP, 1 - PROBABILITY_CLIP]`
/// before taking logarithms.
pub const PROBABILITY_CLIP: f64 = 1e-15;

/// Predictions at or above this probability count as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Metrics for one training or evaluation call. Never cumulative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingMetrics {
    /// Epochs run in the call that produced these metrics.
    pub epoch: u32,
    /// Mean binary cross-entropy.
    pub loss: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Probability a random positive outranks a random negative.
    pub auc: f64,
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self {
            epoch: 0,
            loss: 0.0,
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            auc: 0.5,
        }
    }
}

impl TrainingMetrics {
    #[must_use]
    pub fn with_epoch(mut self, epoch: u32) -> Self {
        self.epoch = epoch;
        self
    }
}

fn sanitize_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

fn is_positive(label: f64) -> bool {
    label >= 0.5
}

/// Compute loss, threshold metrics, and AUC for paired predictions and labels.
///
/// Pairs beyond the shorter of the two slices are ignored. Empty input yields
/// accuracy 0 and AUC 0.5.
#[must_use]
pub fn compute_metrics(predictions: &[f64], labels: &[f64]) -> TrainingMetrics {
    let n = predictions.len().min(labels.len());
    if n == 0 {
        return TrainingMetrics::default();
    }

    let mut loss = 0.0;
    let (mut tp, mut tn, mut fp, mut fneg) = (0usize, 0usize, 0usize, 0usize);

    for (&raw, &label) in predictions.iter().zip(labels).take(n) {
        let p = sanitize_probability(raw);
        let clipped = p.clamp(PROBABILITY_CLIP, 1.0 - PROBABILITY_CLIP);
        let positive = is_positive(label);

        loss -= if positive {
            clipped.ln()
        } else {
            (1.0 - clipped).ln()
        };

        match (p >= DECISION_THRESHOLD, positive) {
            (true, true) => tp += 1,
            (false, false) => tn += 1,
            (true, false) => fp += 1,
            (false, true) => fneg += 1,
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fneg);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    TrainingMetrics {
        epoch: 0,
        loss: loss / n as f64,
        accuracy: ratio(tp + tn, n),
        precision,
        recall,
        f1,
        auc: auc(&predictions[..n], &labels[..n]),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Area under the ROC curve via the Mann-Whitney rank-sum statistic.
///
/// Tied scores share their average rank. Returns 0.5 when either class is
/// empty.
#[must_use]
pub fn auc(predictions: &[f64], labels: &[f64]) -> f64 {
    let mut scored: Vec<(f64, bool)> = predictions
        .iter()
        .zip(labels)
        .map(|(&p, &label)| (sanitize_probability(p), is_positive(label)))
        .collect();

    let positives = scored.iter().filter(|(_, positive)| *positive).count();
    let negatives = scored.len() - positives;
    if positives == 0 || negatives == 0 {
        return 0.5;
    }

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < scored.len() {
        let mut end = start + 1;
        while end < scored.len() && scored[end].0 == scored[start].0 {
            end += 1;
        }

        // Ranks are 1-based; a tie group spanning [start, end) shares the mean.
        let average_rank = (start + 1 + end) as f64 / 2.0;
        let tied_positives = scored[start..end].iter().filter(|(_, p)| *p).count();
        positive_rank_sum += average_rank * tied_positives as f64;
        start = end;
    }

    let n_pos = positives as f64;
    let n_neg = negatives as f64;
    (positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_separated_scores() {
        let predictions = [0.9, 0.8, 0.2, 0.1];
        let labels = [1.0, 1.0, 0.0, 0.0];

        let metrics = compute_metrics(&predictions, &labels);
        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.auc, 1.0);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 1.0);
        assert_eq!(metrics.f1, 1.0);
    }

    #[test]
    fn fully_inverted_scores() {
        let predictions = [0.1, 0.2, 0.8, 0.9];
        let labels = [1.0, 1.0, 0.0, 0.0];

        let metrics = compute_metrics(&predictions, &labels);
        assert_eq!(metrics.accuracy, 0.0);
        assert_eq!(metrics.auc, 0.0);
        assert_eq!(metrics.f1, 0.0);
    }

    #[test]
    fn empty_input() {
        let metrics = compute_metrics(&[], &[]);
        assert_eq!(metrics.accuracy, 0.0);
        assert_eq!(metrics.auc, 0.5);
        assert_eq!(metrics.loss, 0.0);
    }

    #[test]
    fn single_class_auc_is_half() {
        assert_eq!(auc(&[0.3, 0.9], &[1.0, 1.0]), 0.5);
        assert_eq!(auc(&[0.3, 0.9], &[0.0, 0.0]), 0.5);
    }

    #[test]
    fn ties_share_rank() {
        // Every prediction identical: no ranking information.
        assert_eq!(auc(&[0.5, 0.5, 0.5, 0.5], &[1.0, 0.0, 1.0, 0.0]), 0.5);
    }

    #[test]
    fn partial_ordering_auc() {
        // Positives at 0.8 and 0.4, negatives at 0.6 and 0.2: 3 of 4 pairs ordered.
        let value = auc(&[0.8, 0.6, 0.4, 0.2], &[1.0, 0.0, 1.0, 0.0]);
        assert!((value - 0.75).abs() < 1e-12);
    }

    #[test]
    fn loss_survives_saturated_predictions() {
        let metrics = compute_metrics(&[0.0, 1.0, f64::NAN], &[1.0, 0.0, 1.0]);
        assert!(metrics.loss.is_finite());
        assert!(metrics.loss > 0.0);
    }
}
