//! Cached, injectable handle to the current model.
//!
//! The handle lazily loads the model from its [`ModelStore`] on first use and
//! then serves the same immutable snapshot until it is explicitly invalidated
//! or replaced. Readers receive an `Arc<EdgeModel>`; publishing swaps the
//! pointer, so a reader never observes a partially updated weight vector.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::EdgeModel;
use crate::port::ModelStore;

#[derive(Debug, Clone)]
enum CacheState {
    /// Nothing loaded yet, or invalidated since the last load.
    Unloaded,
    /// Load attempted; `None` means no usable model was found.
    Loaded(Option<Arc<EdgeModel>>),
}

/// Lazily-loaded model cache with manual invalidation.
pub struct ModelHandle {
    store: Arc<dyn ModelStore>,
    state: RwLock<CacheState>,
}

impl ModelHandle {
    /// Create a handle over `store`. Nothing is loaded until first use.
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self {
            store,
            state: RwLock::new(CacheState::Unloaded),
        }
    }

    /// Current model snapshot, loading it from the store on first use.
    ///
    /// An absent model is cached too; call [`invalidate`](Self::invalidate)
    /// to retry the store.
    pub fn current(&self) -> Option<Arc<EdgeModel>> {
        if let CacheState::Loaded(model) = &*self.state.read() {
            return model.clone();
        }

        let mut state = self.state.write();
        // Another caller may have loaded while we waited for the write lock.
        if let CacheState::Loaded(model) = &*state {
            return model.clone();
        }

        let model = self.store.load().map(Arc::new);
        match &model {
            Some(m) => info!(
                version = m.version,
                training_samples = m.training_samples,
                location = %self.store.location(),
                "model loaded"
            ),
            None => info!(location = %self.store.location(), "no model available"),
        }
        *state = CacheState::Loaded(model.clone());
        model
    }

    /// Drop the cached snapshot so the next read reloads from the store.
    pub fn invalidate(&self) {
        *self.state.write() = CacheState::Unloaded;
        debug!("model cache invalidated");
    }

    /// Replace the cached snapshot with an already-persisted model.
    pub fn publish(&self, model: EdgeModel) -> Arc<EdgeModel> {
        let model = Arc::new(model);
        *self.state.write() = CacheState::Loaded(Some(Arc::clone(&model)));
        info!(version = model.version, "model published");
        model
    }

    /// Whether a load has been attempted since creation or the last invalidation.
    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.read(), CacheState::Loaded(_))
    }

    /// The store backing this handle.
    pub fn store(&self) -> &Arc<dyn ModelStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        loads: AtomicUsize,
        model: Option<EdgeModel>,
    }

    impl ModelStore for CountingStore {
        fn save(&self, _model: &EdgeModel) -> Result<()> {
            Ok(())
        }

        fn load(&self) -> Option<EdgeModel> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.model.clone()
        }
    }

    fn handle_with(model: Option<EdgeModel>) -> (Arc<CountingStore>, ModelHandle) {
        let store = Arc::new(CountingStore {
            loads: AtomicUsize::new(0),
            model,
        });
        let handle = ModelHandle::new(store.clone());
        (store, handle)
    }

    #[test]
    fn loads_once_until_invalidated() {
        let (store, handle) = handle_with(Some(EdgeModel::default()));
        assert!(!handle.is_loaded());

        assert!(handle.current().is_some());
        assert!(handle.current().is_some());
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);

        handle.invalidate();
        assert!(handle.current().is_some());
        assert_eq!(store.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn absent_model_is_cached() {
        let (store, handle) = handle_with(None);

        assert!(handle.current().is_none());
        assert!(handle.current().is_none());
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn publish_replaces_snapshot_without_touching_readers() {
        let (_store, handle) = handle_with(Some(EdgeModel::default()));
        let before = handle.current().unwrap();

        let mut next = EdgeModel::default();
        next.version = 7;
        handle.publish(next);

        assert_eq!(before.version, 0);
        assert_eq!(handle.current().unwrap().version, 7);
    }
}
