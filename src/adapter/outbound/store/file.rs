//! JSON file model store.
//!
//! Writes the model record atomically (temp file, fsync, rename) so a crash
//! mid-save never leaves a truncated model behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::record;
use crate::domain::EdgeModel;
use crate::error::Result;
use crate::port::ModelStore;

/// Model store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonModelStore {
    path: PathBuf,
}

impl JsonModelStore {
    /// Create a store writing to `path`. Nothing touches disk until `save`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelStore for JsonModelStore {
    fn save(&self, model: &EdgeModel) -> Result<()> {
        let json = record::encode(model)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        info!(
            path = %self.path.display(),
            version = model.version,
            training_samples = model.training_samples,
            "model saved"
        );
        Ok(())
    }

    fn load(&self) -> Option<EdgeModel> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no saved model");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read model");
                return None;
            }
        };

        match record::decode(&content) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable model");
                None
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonModelStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{ definitely not json").unwrap();

        assert!(JsonModelStore::new(&path).load().is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("model.json");
        let store = JsonModelStore::new(&path);

        store.save(&EdgeModel::default()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert!(store.load().is_some());
    }
}
