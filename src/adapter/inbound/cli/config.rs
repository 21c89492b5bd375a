//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::command::ConfigPathArg;
use super::engine::{config_source, load_config};
use super::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Default config template with documentation.
pub const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::hint(&format!(
        "run {} to check your edits",
        output::highlight(format!("edgerank config validate -c {}", path.display()))
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(arg: &ConfigPathArg) -> Result<()> {
    let config = load_config(arg)?;
    let source = config_source(arg);

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "source": source.map(|p| p.display().to_string()),
            "model_path": config.store.model_path().display().to_string(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    match &source {
        Some(path) => output::field("Source", path.display()),
        None => output::field("Source", output::muted("(defaults)")),
    }
    display_config(&config);
    Ok(())
}

fn display_config(config: &Config) {
    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Store");
    output::field("Model", config.store.model_path().display());

    let trainer = &config.trainer;
    output::section("Trainer");
    output::field("Learning rate", trainer.learning_rate);
    output::field("L2", trainer.regularization);
    output::field("LR decay", trainer.lr_decay);
    output::field("Epochs", trainer.epochs);
    output::field(
        "Seed",
        trainer
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string()),
    );
    output::field("Holdout", output::percent(trainer.validation_fraction));

    let scorer = &config.scorer;
    output::section("Scorer");
    output::field("Min samples", scorer.min_training_samples);
    output::field("Blend scale", scorer.blend_scale);
    output::field("Max ML weight", output::percent(scorer.max_ml_weight));
    output::field(
        "Min AUC",
        scorer
            .min_validation_auc
            .map_or_else(|| "off".to_string(), |auc| format!("{auc:.3}")),
    );
}

/// Execute `config validate`.
pub fn execute_validate(arg: &ConfigPathArg) -> Result<()> {
    let source = config_source(arg);
    load_config(arg)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "source": source.map(|p| p.display().to_string()),
            "valid": true,
        }));
        return Ok(());
    }

    output::section("Config Validation");
    match source {
        Some(path) => output::field("Path", path.display()),
        None => output::field("Path", output::muted("(defaults)")),
    }
    output::success("Config is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_as_default_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.trainer.epochs, defaults.trainer.epochs);
        assert_eq!(
            config.scorer.min_training_samples,
            defaults.scorer.min_training_samples
        );
        assert!(config.scorer.min_validation_auc.is_none());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(execute_init(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("config.toml");
        execute_init(&path, false).unwrap();
        assert!(path.exists());
    }
}
