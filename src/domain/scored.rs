//! Scored view of an opportunity.

use serde::Serialize;

use super::opportunity::Opportunity;

/// How the score for an opportunity was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// No usable model: heuristic confidence passed through, `ml_score` 0.5.
    HeuristicOnly,
    /// Model probability blended with heuristic confidence.
    Blended,
}

/// An opportunity plus its model-derived scores. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredOpportunity {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub ml_score: f64,
    pub adjusted_confidence: f64,
    pub expected_value: f64,
    pub rank_score: f64,
    pub mode: ScoringMode,
}
