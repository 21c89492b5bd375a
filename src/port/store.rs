//! Model persistence port.

use crate::domain::EdgeModel;
use crate::error::Result;

/// Durable storage for the single model aggregate.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `load` never fails: missing, unreadable, or corrupt data is logged and
///   reported as `None` so scoring can fall back to heuristic-only mode
/// - `save` must round-trip every field of [`EdgeModel`] losslessly
pub trait ModelStore: Send + Sync {
    /// Persist the full model, replacing any previous one.
    fn save(&self, model: &EdgeModel) -> Result<()>;

    /// Load the persisted model, or `None` if none is usable.
    fn load(&self) -> Option<EdgeModel>;

    /// Human-readable location for status output.
    fn location(&self) -> String {
        "memory".to_string()
    }
}
