//! # Service Container
//!
//! Holds the opened store, the data-directory lock and the configuration the
//! gateway is built from.

pub mod config;
pub mod services;

pub use config::{ConfigError, NodeConfig, StorageBackend, StorageConfig};
pub use services::ServiceContainer;
