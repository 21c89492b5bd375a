//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  Trainer, Scorer,       │
//!                    │  ModelHandle, Retrainer │
//!                    └────────────┬────────────┘
//!                                 │
//!                                 ▼
//!                          ┌─────────────┐
//!                          │ ModelStore  │
//!                          │   Adapter   │
//!                          └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ModelStore`] - Durable save/load of the model aggregate

mod store;

pub use store::ModelStore;
