//! # Node Runtime Library
//!
//! Wires the entity store to the API gateway. The binary in `main.rs` is a
//! thin wrapper over [`NodeRuntime`]; everything else lives here so it can
//! be tested.
//!
//! - `container/` - configuration and the shared store handle
//! - `adapters/` - storage backends (memory, file, RocksDB) and the data-dir lock
//! - `runtime` - startup, serving and graceful shutdown

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod container;
pub mod runtime;

pub use container::{ConfigError, NodeConfig, ServiceContainer, StorageBackend, StorageConfig};
pub use runtime::NodeRuntime;
