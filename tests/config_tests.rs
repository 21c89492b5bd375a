use std::fs;
use std::path::PathBuf;

use edgerank::application::{BlendPolicy, RetrainSettings};
use edgerank::error::{ConfigError, Error};
use edgerank::infrastructure::config::Config;

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
        [logging]
        level = "debug"
        format = "json"

        [trainer]
        learning_rate = 0.05
        regularization = 0.0
        lr_decay = 0.95
        epochs = 4
        seed = 99
        validation_fraction = 0.25

        [scorer]
        min_training_samples = 50
        blend_scale = 500.0
        max_ml_weight = 0.4
        min_validation_auc = 0.6
        "#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.format, "json");

    let settings = RetrainSettings::from(&config.trainer);
    assert_eq!(settings.epochs, 4);
    assert_eq!(settings.validation_fraction, 0.25);
    assert_eq!(settings.learning_rate, 0.05);
    assert_eq!(settings.regularization, 0.0);

    let policy = BlendPolicy::from(&config.scorer);
    assert_eq!(policy.min_training_samples, 50);
    assert_eq!(policy.min_validation_auc, Some(0.6));
    assert!((policy.ml_weight(100) - 0.2).abs() < 1e-12);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn invalid_values_name_the_field() {
    let cases = [
        ("[trainer]\nlearning_rate = 0.0\n", "learning_rate"),
        ("[trainer]\nregularization = -1.0\n", "regularization"),
        ("[trainer]\nlr_decay = 1.5\n", "lr_decay"),
        ("[trainer]\nepochs = 0\n", "epochs"),
        ("[trainer]\nvalidation_fraction = 1.0\n", "validation_fraction"),
        ("[scorer]\nblend_scale = 0.0\n", "blend_scale"),
        ("[scorer]\nmax_ml_weight = -0.1\n", "max_ml_weight"),
        ("[scorer]\nmin_validation_auc = 2.0\n", "min_validation_auc"),
    ];

    for (toml, expected) in cases {
        match Config::parse_toml(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected, "for {toml:?}");
            }
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }
}

#[test]
fn wrong_types_are_parse_errors() {
    let result = Config::parse_toml("[trainer]\nepochs = \"ten\"\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn env_var_overrides_model_path() {
    std::env::set_var("EDGERANK_MODEL_PATH", "/tmp/edgerank-env/model.json");
    let from_toml = Config::parse_toml("[store]\npath = \"/elsewhere/model.json\"\n").unwrap();
    let from_defaults = Config::from_env();
    std::env::remove_var("EDGERANK_MODEL_PATH");

    let expected = PathBuf::from("/tmp/edgerank-env/model.json");
    assert_eq!(from_toml.store.model_path(), expected);
    assert_eq!(from_defaults.store.model_path(), expected);
}
