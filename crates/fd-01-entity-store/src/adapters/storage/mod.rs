//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod memory;
mod mock;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
pub use mock::FaultyKVStore;
