//! Edgerank - online-learned edge scoring for prediction market opportunities.
//!
//! Upstream detectors emit opportunities carrying a heuristic edge, a
//! confidence, an urgency tier, and the signal sources that produced them.
//! This crate learns from resolved outcomes which of those opportunities
//! tend to be right, and re-ranks new ones by blending a small logistic
//! regression model with the heuristic confidence.
//!
//! # Architecture
//!
//! - [`domain`] - Pure math and types: feature extraction, running
//!   statistics, normalization, prediction, metrics, feature importance.
//! - [`port`] - The [`port::ModelStore`] persistence seam.
//! - [`application`] - [`application::Trainer`], the cached
//!   [`application::ModelHandle`], the [`application::Scorer`], and the
//!   single-writer [`application::Retrainer`].
//! - [`adapter`] - JSON file and in-memory stores, plus the CLI.
//! - [`infrastructure`] - Configuration loading and logging setup.
//! - [`error`] - Error types for the crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use edgerank::adapter::outbound::store::MemoryModelStore;
//! use edgerank::application::{BlendPolicy, ModelHandle, Scorer};
//! use edgerank::domain::{Opportunity, Urgency};
//!
//! let handle = Arc::new(ModelHandle::new(Arc::new(MemoryModelStore::new())));
//! let scorer = Scorer::new(handle, BlendPolicy::default());
//!
//! let opportunity = Opportunity::builder()
//!     .market("Will it rain?")
//!     .edge(0.10)
//!     .confidence(0.75)
//!     .urgency(Urgency::Standard)
//!     .build();
//! let scored = scorer.score(&opportunity);
//! assert_eq!(scored.ml_score, 0.5);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
