//! # Adapters Module
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` implementations (memory, file, fault injection)
//! - `infra`: clocks

pub mod infra;
pub mod storage;

pub use infra::{FixedTimeSource, SystemTimeSource};
pub use storage::{FaultyKVStore, FileBackedKVStore, InMemoryKVStore};
