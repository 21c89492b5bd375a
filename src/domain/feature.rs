//! Fixed-width feature encoding of opportunities.
//!
//! Feature order is part of the persisted model format: weights and running
//! statistics are stored positionally, so reordering or inserting features
//! invalidates every saved model.

use std::ops::{Deref, Index};

use super::opportunity::{Opportunity, SignalSource};

/// Width of every feature vector.
pub const NUM_FEATURES: usize = 4 + SignalSource::ALL.len() + 2;

/// Human-readable feature names, positionally aligned with [`FeatureVector`].
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "edge_magnitude",
    "direction",
    "confidence",
    "urgency",
    "source_cross_platform",
    "source_sentiment",
    "source_sportsbook",
    "source_news",
    "source_whale",
    "signal_count",
    "signal_agreement",
];

const EDGE: usize = 0;
const DIRECTION: usize = 1;
const CONFIDENCE: usize = 2;
const URGENCY: usize = 3;
const FIRST_SOURCE: usize = 4;
const SIGNAL_COUNT: usize = FIRST_SOURCE + SignalSource::ALL.len();
const AGREEMENT: usize = SIGNAL_COUNT + 1;

/// Replace NaN and infinities with zero.
#[inline]
#[must_use]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Fixed-length numeric encoding of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    #[must_use]
    pub const fn new(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn zeros() -> Self {
        Self([0.0; NUM_FEATURES])
    }

    /// Build from a slice, padding with zeros or truncating to `NUM_FEATURES`.
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Self {
        let mut out = [0.0; NUM_FEATURES];
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = *value;
        }
        Self(out)
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; NUM_FEATURES] {
        &self.0
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<[f64; NUM_FEATURES]> for FeatureVector {
    fn from(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }
}

/// Encode an opportunity as a feature vector.
///
/// Pure and total: non-finite numeric fields and missing or unknown signal
/// fields encode as 0.
#[must_use]
pub fn extract(opportunity: &Opportunity) -> FeatureVector {
    let mut features = [0.0; NUM_FEATURES];

    features[EDGE] = finite_or_zero(opportunity.edge).abs();
    features[DIRECTION] = opportunity.direction.sign();
    features[CONFIDENCE] = finite_or_zero(opportunity.confidence);
    features[URGENCY] = opportunity.urgency.feature_score();

    for (offset, source) in SignalSource::ALL.iter().enumerate() {
        if opportunity.has_signal(source.key()) {
            features[FIRST_SOURCE + offset] = 1.0;
        }
    }

    features[SIGNAL_COUNT] = opportunity.signal_count() as f64;
    if opportunity.known_source_count() >= 2 {
        features[AGREEMENT] = 1.0;
    }

    FeatureVector(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opportunity::{Direction, Urgency};

    #[test]
    fn direction_sign_encodes_both_sides() {
        let yes = Opportunity::builder().direction(Direction::BuyYes).build();
        let no = Opportunity::builder().direction(Direction::BuyNo).build();

        assert_eq!(extract(&yes)[DIRECTION], 1.0);
        assert_eq!(extract(&no)[DIRECTION], -1.0);
    }

    #[test]
    fn urgency_is_discretised() {
        let score = |urgency| extract(&Opportunity::builder().urgency(urgency).build())[URGENCY];

        assert_eq!(score(Urgency::Critical), 1.0);
        assert_eq!(score(Urgency::Standard), 0.5);
        assert_eq!(score(Urgency::Fyi), 0.2);
        assert_eq!(score(Urgency::Unknown), 0.0);
    }

    #[test]
    fn edge_is_encoded_as_magnitude() {
        let opp = Opportunity::builder().edge(-0.07).build();
        assert!((extract(&opp)[EDGE] - 0.07).abs() < 1e-12);
    }

    #[test]
    fn sources_are_one_hot_with_agreement_flag() {
        let single = Opportunity::builder().signal(SignalSource::Sentiment).build();
        let pair = Opportunity::builder()
            .signal(SignalSource::Sentiment)
            .signal(SignalSource::Sportsbook)
            .build();

        let single = extract(&single);
        assert_eq!(single[FIRST_SOURCE + 1], 1.0);
        assert_eq!(single[SIGNAL_COUNT], 1.0);
        assert_eq!(single[AGREEMENT], 0.0);

        let pair = extract(&pair);
        assert_eq!(pair[FIRST_SOURCE + 1], 1.0);
        assert_eq!(pair[FIRST_SOURCE + 2], 1.0);
        assert_eq!(pair[SIGNAL_COUNT], 2.0);
        assert_eq!(pair[AGREEMENT], 1.0);
    }

    #[test]
    fn null_payloads_still_count_as_present() {
        let opp = Opportunity::builder()
            .raw_signal(SignalSource::News.key(), None)
            .raw_signal(SignalSource::Whale.key(), Some(serde_json::Value::Null))
            .build();

        let features = extract(&opp);
        assert_eq!(features[FIRST_SOURCE + 3], 1.0);
        assert_eq!(features[FIRST_SOURCE + 4], 1.0);
        assert_eq!(features[SIGNAL_COUNT], 2.0);
        assert_eq!(features[AGREEMENT], 1.0);
    }

    #[test]
    fn non_finite_inputs_encode_as_zero() {
        let opp = Opportunity::builder()
            .edge(f64::NAN)
            .confidence(f64::INFINITY)
            .build();

        let features = extract(&opp);
        assert!(features.iter().all(|x| x.is_finite()));
        assert_eq!(features[EDGE], 0.0);
        assert_eq!(features[CONFIDENCE], 0.0);
    }

    #[test]
    fn names_cover_every_feature() {
        assert_eq!(FEATURE_NAMES.len(), NUM_FEATURES);
        assert_eq!(FEATURE_NAMES[AGREEMENT], "signal_agreement");
    }
}
