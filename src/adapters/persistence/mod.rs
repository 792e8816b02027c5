pub mod json_store;
pub mod memory_store;

pub use json_store::JsonStore;
pub use memory_store::MemoryStore;
