//! Infrastructure configuration modules.

pub mod logging;
pub mod scorer;
pub mod settings;
pub mod store;
pub mod trainer;

pub use settings::Config;
