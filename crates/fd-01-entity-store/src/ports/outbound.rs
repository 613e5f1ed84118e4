//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the entity store requires from the host application.

use crate::domain::errors::KVStoreError;
use shared_types::TimestampMillis;

/// Abstract interface for key-value database operations.
///
/// Production: `FileBackedKVStore` (below) or `RocksDbStore`
/// (node-runtime/adapters/storage/rocksdb_adapter.rs)
/// Testing: `InMemoryKVStore`
///
/// Each call is one independent store operation. The entity layer never
/// assumes two calls are applied atomically.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, replacing any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;
}

/// Store chosen at runtime (memory, file or RocksDB behind one type).
pub type DynKVStore = Box<dyn KeyValueStore>;

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        (**self).exists(key)
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> TimestampMillis;
}
