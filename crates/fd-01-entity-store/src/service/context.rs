//! # Store Context
//!
//! The store-scoped handle every entity operation goes through. Holds the
//! key-value store and the clock; cloning shares both.

use crate::adapters::SystemTimeSource;
use crate::domain::errors::EntityError;
use crate::ports::outbound::{KeyValueStore, TimeSource};
use parking_lot::RwLock;
use shared_types::TimestampMillis;
use std::sync::Arc;

/// Shared access to one key-value store.
///
/// The lock is held for a single store operation only. Sequences of
/// operations (read-then-write, record-then-index) are not atomic.
pub struct StoreContext<KV> {
    kv: Arc<RwLock<KV>>,
    clock: Arc<dyn TimeSource>,
}

impl<KV> Clone for StoreContext<KV> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<KV: KeyValueStore> StoreContext<KV> {
    /// Wrap `kv` with an explicit clock.
    pub fn new(kv: KV, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            kv: Arc::new(RwLock::new(kv)),
            clock,
        }
    }

    /// Wrap `kv` with the system clock.
    pub fn with_system_clock(kv: KV) -> Self {
        Self::new(kv, Arc::new(SystemTimeSource))
    }

    /// Current time from the context's clock.
    pub fn now_millis(&self) -> TimestampMillis {
        self.clock.now_millis()
    }

    /// Shared clock handle.
    pub fn clock(&self) -> Arc<dyn TimeSource> {
        Arc::clone(&self.clock)
    }

    pub(crate) fn read(&self, key: &str) -> Result<Option<Vec<u8>>, EntityError> {
        Ok(self.kv.read().get(key.as_bytes())?)
    }

    pub(crate) fn contains(&self, key: &str) -> Result<bool, EntityError> {
        Ok(self.kv.read().exists(key.as_bytes())?)
    }

    pub(crate) fn write(&self, key: &str, value: &[u8]) -> Result<(), EntityError> {
        Ok(self.kv.write().put(key.as_bytes(), value)?)
    }

    /// Delete `key`, reporting whether it was present.
    pub(crate) fn remove(&self, key: &str) -> Result<bool, EntityError> {
        let mut kv = self.kv.write();
        let existed = kv.exists(key.as_bytes())?;
        if existed {
            kv.delete(key.as_bytes())?;
        }
        Ok(existed)
    }

    /// Run `f` with exclusive access to the raw store.
    ///
    /// For adapters and tests that need to inspect or plant raw values.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut KV) -> R) -> R {
        f(&mut self.kv.write())
    }
}
