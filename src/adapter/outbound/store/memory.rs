//! In-memory model store for tests and embedding.

use parking_lot::RwLock;

use crate::domain::EdgeModel;
use crate::error::Result;
use crate::port::ModelStore;

#[derive(Debug, Default)]
pub struct MemoryModelStore {
    model: RwLock<Option<EdgeModel>>,
}

impl MemoryModelStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `model`.
    pub fn with_model(model: EdgeModel) -> Self {
        Self {
            model: RwLock::new(Some(model)),
        }
    }
}

impl ModelStore for MemoryModelStore {
    fn save(&self, model: &EdgeModel) -> Result<()> {
        *self.model.write() = Some(model.clone());
        Ok(())
    }

    fn load(&self) -> Option<EdgeModel> {
        self.model.read().clone()
    }
}
