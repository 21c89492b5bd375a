//! Pure engine math and types. No I/O.

pub mod feature;
pub mod importance;
pub(crate) mod lenient;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod opportunity;
pub mod scored;
pub mod stats;

pub use feature::{extract, finite_or_zero, FeatureVector, FEATURE_NAMES, NUM_FEATURES};
pub use importance::FeatureImportance;
pub use metrics::{compute_metrics, TrainingMetrics};
pub use model::{predict, EdgeModel, ModelWeights};
pub use normalize::normalize;
pub use opportunity::{Direction, Opportunity, OpportunityBuilder, SignalSource, Urgency};
pub use scored::{ScoredOpportunity, ScoringMode};
pub use stats::FeatureStats;
