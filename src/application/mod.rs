//! Engine services built on the domain and the store port.

pub mod handle;
pub mod retrain;
pub mod scorer;
pub mod trainer;

pub use handle::ModelHandle;
pub use retrain::{LabeledOpportunity, RetrainReport, RetrainSettings, Retrainer};
pub use scorer::{BlendPolicy, ModelStatus, Scorer};
pub use trainer::Trainer;
