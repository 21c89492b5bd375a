use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Caller-contract violations detected by the trainer.
///
/// These are never recovered locally: a batch with mismatched inputs is
/// rejected as a whole rather than silently truncated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainingError {
    #[error("features and labels differ in length: {features} features, {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("label at index {index} is not 0 or 1")]
    InvalidLabel { index: usize },

    #[error("no training samples supplied")]
    NoSamples,
}

/// Persistence errors raised while writing or decoding a model record.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to encode model record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode model record: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("model record schema {found} is newer than supported schema {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("model has {training_samples} training samples (use --force to discard)")]
    ResetRefused { training_samples: u64 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
