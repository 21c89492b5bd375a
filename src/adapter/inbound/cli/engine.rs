//! Wiring shared by the model commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::command::{ConfigPathArg, EngineArgs};
use super::paths;
use crate::adapter::outbound::store::JsonModelStore;
use crate::application::{ModelHandle, RetrainSettings, Retrainer, Scorer};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, `~/.edgerank/config.toml` is
/// used when present and defaults otherwise.
pub fn load_config(arg: &ConfigPathArg) -> Result<Config> {
    if let Some(path) = &arg.config {
        return Config::load(path);
    }

    let default_path = paths::default_config();
    if default_path.exists() {
        Config::load(&default_path)
    } else {
        Ok(Config::from_env())
    }
}

/// Path of the config file actually in effect, if any.
pub fn config_source(arg: &ConfigPathArg) -> Option<PathBuf> {
    arg.config.clone().or_else(|| {
        let default_path = paths::default_config();
        default_path.exists().then_some(default_path)
    })
}

/// Configuration plus an open model handle.
pub struct Engine {
    pub config: Config,
    pub model_path: PathBuf,
    pub handle: Arc<ModelHandle>,
}

impl Engine {
    /// Load configuration and attach to the model file.
    pub fn open(args: &EngineArgs) -> Result<Self> {
        let config = load_config(&args.config)?;
        Ok(Self::with_config(config, args.model.as_deref()))
    }

    pub fn with_config(config: Config, model_override: Option<&Path>) -> Self {
        let model_path = model_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.store.model_path());
        debug!(path = %model_path.display(), "using model file");

        let store = Arc::new(JsonModelStore::new(&model_path));
        let handle = Arc::new(ModelHandle::new(store));
        Self {
            config,
            model_path,
            handle,
        }
    }

    #[must_use]
    pub fn scorer(&self) -> Scorer {
        Scorer::new(
            Arc::clone(&self.handle),
            (&self.config.scorer).into(),
        )
    }

    /// Retraining job with optional per-run overrides.
    #[must_use]
    pub fn retrainer(&self, epochs: Option<u32>, seed: Option<u64>) -> Retrainer {
        let mut trainer_config = self.config.trainer.clone();
        if let Some(seed) = seed {
            trainer_config.seed = Some(seed);
        }
        let mut settings = RetrainSettings::from(&trainer_config);
        if let Some(epochs) = epochs {
            settings.epochs = epochs;
        }
        Retrainer::new(Arc::clone(&self.handle), trainer_config.trainer(), settings)
    }
}
