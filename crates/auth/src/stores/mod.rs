//! Durable key-value storage implementations.
//!
//! Provides `KeyValueStore` implementations for:
//! - In-memory (tests, `--ephemeral` runs)
//! - A JSON file on disk

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
