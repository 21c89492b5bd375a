//! Canonical test configurations.

use std::sync::Arc;

use crate::adapter::outbound::store::MemoryModelStore;
use crate::application::{BlendPolicy, ModelHandle, RetrainSettings, Retrainer, Scorer, Trainer};
use crate::application::trainer::DEFAULT_LR_DECAY;
use crate::port::ModelStore;

/// Seed used by every deterministic test trainer.
pub const TEST_SEED: u64 = 7;

/// Retraining settings with no holdout, so every sample is trained on.
pub fn retrain_all(epochs: u32) -> RetrainSettings {
    RetrainSettings {
        epochs,
        validation_fraction: 0.0,
        ..RetrainSettings::default()
    }
}

/// Handle, scorer, and retrainer sharing one store.
pub struct TestEngine {
    pub store: Arc<dyn ModelStore>,
    pub handle: Arc<ModelHandle>,
    pub scorer: Scorer,
    pub retrainer: Retrainer,
}

/// Engine over `store` with a seeded trainer.
pub fn engine_with(
    store: Arc<dyn ModelStore>,
    policy: BlendPolicy,
    settings: RetrainSettings,
) -> TestEngine {
    let handle = Arc::new(ModelHandle::new(Arc::clone(&store)));
    TestEngine {
        scorer: Scorer::new(Arc::clone(&handle), policy),
        retrainer: Retrainer::new(
            Arc::clone(&handle),
            Trainer::new(DEFAULT_LR_DECAY, Some(TEST_SEED)),
            settings,
        ),
        store,
        handle,
    }
}

/// Engine over an empty in-memory store with default policy.
pub fn memory_engine() -> TestEngine {
    engine_with(
        Arc::new(MemoryModelStore::new()),
        BlendPolicy::default(),
        RetrainSettings::default(),
    )
}
