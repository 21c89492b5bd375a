//! Path utilities for edgerank.
//!
//! All data lives under `~/.edgerank/`:
//! - `~/.edgerank/config.toml` - engine configuration
//! - `~/.edgerank/edge_model.json` - persisted model

use std::path::PathBuf;

use crate::infrastructure::config::store::default_model_path;

/// Returns the edgerank home directory (`~/.edgerank/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".edgerank")
}

/// Returns the default config file path (`~/.edgerank/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default model path (`~/.edgerank/edge_model.json`).
pub fn default_model() -> PathBuf {
    default_model_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_edgerank_home() {
        let home = home_dir();
        assert!(home.to_string_lossy().contains(".edgerank"));
        assert!(default_config().starts_with(&home));
        assert!(default_model().starts_with(&home));
    }
}
