//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for opportunities and labeled outcomes.
//! - [`samples`] - Seeded generators of learnable outcome batches.
//! - [`config`] - Canonical test configurations and in-memory engines.

pub mod config;
pub mod domain;
pub mod samples;
