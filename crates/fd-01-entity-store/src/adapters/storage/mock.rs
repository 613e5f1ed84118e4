use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;

/// Key-value store with switchable failures for error-path tests.
///
/// Behaves like an in-memory store until `fail_reads` / `fail_writes` is set,
/// after which the corresponding operations return `IOError`.
#[derive(Default)]
pub struct FaultyKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FaultyKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails.
    pub fn unavailable() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Write directly, bypassing `fail_writes`. Used to plant raw values.
    pub fn plant(&mut self, key: &[u8], value: &[u8]) {
        self.data.insert(key.to_vec(), value.to_vec());
    }

    fn read_guard(&self) -> Result<(), KVStoreError> {
        if self.fail_reads {
            return Err(KVStoreError::IOError {
                message: "injected read failure".to_string(),
            });
        }
        Ok(())
    }

    fn write_guard(&self) -> Result<(), KVStoreError> {
        if self.fail_writes {
            return Err(KVStoreError::IOError {
                message: "injected write failure".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for FaultyKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.read_guard()?;
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.write_guard()?;
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.write_guard()?;
        self.data.remove(key);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.read_guard()?;
        Ok(self.data.contains_key(key))
    }
}
