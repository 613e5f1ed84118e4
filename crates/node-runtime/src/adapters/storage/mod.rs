//! # Storage Adapters
//!
//! Opens the configured key-value store for the entity layer.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to use the RocksDB backend:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! The file and RocksDB backends take an exclusive lock on the data
//! directory so two nodes never write the same store.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

use crate::container::config::{StorageBackend, StorageConfig};
use anyhow::{Context, Result};
use fd_01_entity_store::adapters::{FileBackedKVStore, InMemoryKVStore};
use fd_01_entity_store::DynKVStore;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the file backend inside the data directory.
pub const STORE_FILE: &str = "entities.bin";
/// Directory name of the RocksDB backend inside the data directory.
pub const ROCKSDB_DIR: &str = "rocksdb";
/// Lock file guarding the data directory.
pub const LOCK_FILE: &str = "LOCK.fd";

/// Exclusive lock on a data directory, released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    file: File,
    path: PathBuf,
}

impl DataDirLock {
    /// Create `dir` if needed and lock it.
    pub fn acquire(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create data directory {}", dir.display()))?;

        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("cannot open lock file {}", path.display()))?;
        file.try_lock_exclusive().with_context(|| {
            format!(
                "data directory {} is in use by another process",
                dir.display()
            )
        })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// An opened store plus the lock that guards it (if any).
pub struct OpenedStore {
    pub kv: DynKVStore,
    pub lock: Option<DataDirLock>,
}

/// Open the store selected by `config`.
pub fn open_store(config: &StorageConfig) -> Result<OpenedStore> {
    match config.backend {
        StorageBackend::Memory => {
            info!("[node] Using in-memory store (data is lost on exit)");
            Ok(OpenedStore {
                kv: Box::new(InMemoryKVStore::new()),
                lock: None,
            })
        }
        StorageBackend::File => {
            let lock = DataDirLock::acquire(&config.data_dir)?;
            let path = config.data_dir.join(STORE_FILE);
            let kv = FileBackedKVStore::open(&path)
                .with_context(|| format!("cannot open store file {}", path.display()))?;
            info!("[node] Using file store at {}", path.display());
            Ok(OpenedStore {
                kv: Box::new(kv),
                lock: Some(lock),
            })
        }
        StorageBackend::RocksDb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &StorageConfig) -> Result<OpenedStore> {
    let lock = DataDirLock::acquire(&config.data_dir)?;
    let rocks_config = RocksDbConfig {
        path: config.data_dir.join(ROCKSDB_DIR),
        sync_writes: config.sync_writes,
        ..RocksDbConfig::default()
    };
    let store = RocksDbStore::open(rocks_config).context("cannot open RocksDB store")?;
    Ok(OpenedStore {
        kv: Box::new(store),
        lock: Some(lock),
    })
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &StorageConfig) -> Result<OpenedStore> {
    anyhow::bail!("storage backend 'rocksdb' requires building node-runtime with the `rocksdb` feature")
}
