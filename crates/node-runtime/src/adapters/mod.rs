//! # Node Adapters
//!
//! Concrete backends plugged into the entity store's outbound ports.

pub mod storage;

pub use storage::{open_store, DataDirLock, OpenedStore};
