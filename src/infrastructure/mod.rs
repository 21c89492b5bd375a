//! Infrastructure layer.
//!
//! Technical concerns that support the engine without containing its
//! logic: configuration loading and logging setup.

pub mod config;
