//! Builders for domain primitives used across tests.

use crate::application::LabeledOpportunity;
use crate::domain::{Direction, Opportunity, SignalSource, Urgency};

/// Opportunity with the given edge, confidence, and urgency, buying YES with
/// no signals.
pub fn opportunity(market: &str, edge: f64, confidence: f64, urgency: Urgency) -> Opportunity {
    Opportunity::builder()
        .market(market)
        .edge(edge)
        .confidence(confidence)
        .urgency(urgency)
        .direction(Direction::BuyYes)
        .build()
}

/// Standard-urgency opportunity.
pub fn standard(market: &str, edge: f64, confidence: f64) -> Opportunity {
    opportunity(market, edge, confidence, Urgency::Standard)
}

/// Opportunity carrying the given signal sources.
pub fn with_sources(market: &str, edge: f64, sources: &[SignalSource]) -> Opportunity {
    sources
        .iter()
        .fold(
            Opportunity::builder()
                .market(market)
                .edge(edge)
                .confidence(0.6)
                .urgency(Urgency::Standard)
                .direction(Direction::BuyYes),
            |builder, source| builder.signal(*source),
        )
        .build()
}

/// Labeled outcome wrapper.
pub fn labeled(opportunity: Opportunity, outcome: bool) -> LabeledOpportunity {
    LabeledOpportunity::new(opportunity, outcome)
}
