//! Model store adapters.

mod file;
mod memory;
pub mod record;

pub use file::JsonModelStore;
pub use memory::MemoryModelStore;
