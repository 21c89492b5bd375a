//! Opportunity type with builder pattern.
//!
//! An [`Opportunity`] is a candidate trade produced by an upstream detector
//! (cross-platform price comparer, sentiment analyzer, sportsbook consensus,
//! news fetcher). The engine reads only its numeric fields and which signal
//! keys are present; signal payloads are carried through untouched.
//!
//! Decoding is lenient: missing, `null` or mistyped fields default, and
//! unrecognised urgency or direction values decode to an `Unknown` variant
//! with neutral encodings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::lenient;

/// Urgency multiplier applied to `critical` opportunities when ranking.
pub const CRITICAL_RANK_MULTIPLIER: f64 = 1.5;
/// Urgency multiplier applied to `standard` (and unrecognised) opportunities.
pub const STANDARD_RANK_MULTIPLIER: f64 = 1.0;
/// Urgency multiplier applied to `fyi` opportunities.
pub const FYI_RANK_MULTIPLIER: f64 = 0.5;

/// Time-sensitivity bucket for acting on a signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    Standard,
    Fyi,
    /// Missing or unrecognised urgency.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Urgency {
    /// Discretised urgency used as a model feature.
    ///
    /// Unknown urgency encodes as the neutral value 0.
    #[must_use]
    pub const fn feature_score(self) -> f64 {
        match self {
            Self::Critical => 1.0,
            Self::Standard => 0.5,
            Self::Fyi => 0.2,
            Self::Unknown => 0.0,
        }
    }

    /// Multiplier applied to expected value when ranking.
    #[must_use]
    pub const fn rank_multiplier(self) -> f64 {
        match self {
            Self::Critical => CRITICAL_RANK_MULTIPLIER,
            Self::Standard | Self::Unknown => STANDARD_RANK_MULTIPLIER,
            Self::Fyi => FYI_RANK_MULTIPLIER,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Standard => "standard",
            Self::Fyi => "fyi",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a binary market the opportunity recommends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "BUY_YES")]
    BuyYes,
    #[serde(rename = "BUY_NO")]
    BuyNo,
    /// Missing or unrecognised direction.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Direction {
    /// Direction sign used as a model feature: +1 for YES, -1 for NO, 0 otherwise.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::BuyYes => 1.0,
            Self::BuyNo => -1.0,
            Self::Unknown => 0.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuyYes => "BUY_YES",
            Self::BuyNo => "BUY_NO",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal sources the feature extractor one-hot encodes.
///
/// Signals under any other key still count toward the total signal count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    CrossPlatform,
    Sentiment,
    Sportsbook,
    News,
    Whale,
}

impl SignalSource {
    /// All known sources in feature order.
    pub const ALL: [SignalSource; 5] = [
        Self::CrossPlatform,
        Self::Sentiment,
        Self::Sportsbook,
        Self::News,
        Self::Whale,
    ];

    /// Signal map key upstream detectors publish under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CrossPlatform => "cross_platform",
            Self::Sentiment => "sentiment",
            Self::Sportsbook => "sportsbook",
            Self::News => "news",
            Self::Whale => "whale",
        }
    }
}

/// A candidate trade signal from upstream detectors.
///
/// Use [`Opportunity::builder()`] for programmatic construction; the serde
/// representation is the wire format detectors emit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Free-form market label, carried through for display.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub market: String,
    /// Estimated mispricing between fair value and market price.
    #[serde(default, deserialize_with = "lenient::float")]
    pub edge: f64,
    /// Heuristic confidence in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient::float")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub urgency: Urgency,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub direction: Direction,
    /// Signal payloads keyed by source. Only key presence is read; a `null`
    /// payload still counts as a present signal.
    #[serde(default, deserialize_with = "lenient::signal_map")]
    pub signals: BTreeMap<String, Option<serde_json::Value>>,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::new()
    }

    /// Whether a signal key is present, whatever its payload.
    #[must_use]
    pub fn has_signal(&self, key: &str) -> bool {
        self.signals.contains_key(key)
    }

    /// Number of present signals, known or not.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Number of distinct known sources present.
    #[must_use]
    pub fn known_source_count(&self) -> usize {
        SignalSource::ALL
            .iter()
            .filter(|source| self.has_signal(source.key()))
            .count()
    }
}

/// Builder for constructing [`Opportunity`] instances.
///
/// # Example
///
/// ```
/// use edgerank::domain::{Direction, Opportunity, SignalSource, Urgency};
///
/// let opportunity = Opportunity::builder()
///     .market("Will X happen?")
///     .edge(0.10)
///     .confidence(0.75)
///     .urgency(Urgency::Critical)
///     .direction(Direction::BuyYes)
///     .signal(SignalSource::Sentiment)
///     .build();
///
/// assert_eq!(opportunity.signal_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    inner: Opportunity,
}

impl OpportunityBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.inner.market = market.into();
        self
    }

    pub fn edge(mut self, edge: f64) -> Self {
        self.inner.edge = edge;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.inner.confidence = confidence;
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.inner.urgency = urgency;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.inner.direction = direction;
        self
    }

    /// Mark a known source as present with an empty payload.
    pub fn signal(self, source: SignalSource) -> Self {
        self.raw_signal(source.key(), Some(serde_json::Value::Bool(true)))
    }

    /// Insert an arbitrary signal key and payload.
    pub fn raw_signal(mut self, key: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        self.inner.signals.insert(key.into(), payload);
        self
    }

    /// Build the Opportunity.
    pub fn build(self) -> Opportunity {
        self.inner
    }
}
