//! Model store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable overriding `[store].path`.
pub const MODEL_PATH_ENV: &str = "EDGERANK_MODEL_PATH";

/// Where the persisted model lives.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Model file path. Defaults to `~/.edgerank/edge_model.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolved model file path.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_model_path)
    }
}

/// Default model path (`~/.edgerank/edge_model.json`).
pub fn default_model_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".edgerank")
        .join("edge_model.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_path_falls_back_to_home() {
        let path = StoreConfig::default().model_path();
        assert!(path.ends_with(".edgerank/edge_model.json"));
    }

    #[test]
    fn explicit_path_wins() {
        let config = StoreConfig {
            path: Some(PathBuf::from("/tmp/model.json")),
        };
        assert_eq!(config.model_path(), PathBuf::from("/tmp/model.json"));
    }
}
