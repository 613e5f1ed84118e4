//! # Node Configuration
//!
//! Gateway settings plus the storage backend, loaded from an optional JSON
//! file and then overridden from the environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `FD_CONFIG` | path of a JSON file read before the overrides |
//! | `FD_HTTP_HOST` | `gateway.http.host` |
//! | `FD_HTTP_PORT` | `gateway.http.port` |
//! | `FD_STORAGE_BACKEND` | `storage.backend` (`memory`, `file`, `rocksdb`) |
//! | `FD_DATA_DIR` | `storage.data_dir` |
//! | `FD_MAX_PAGE_SIZE` | `gateway.limits.max_page_size` |
//!
//! A value that does not parse stops startup; nothing is silently ignored.

use fd_02_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_CONFIG_FILE: &str = "FD_CONFIG";
pub const ENV_HTTP_HOST: &str = "FD_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "FD_HTTP_PORT";
pub const ENV_STORAGE_BACKEND: &str = "FD_STORAGE_BACKEND";
pub const ENV_DATA_DIR: &str = "FD_DATA_DIR";
pub const ENV_MAX_PAGE_SIZE: &str = "FD_MAX_PAGE_SIZE";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// API Gateway configuration.
    pub gateway: GatewayConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

impl NodeConfig {
    /// Load from `FD_CONFIG` (if set) and the `FD_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`NodeConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_FILE) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = parse_var(lookup, ENV_HTTP_HOST)? {
            self.gateway.http.host = host;
        }
        if let Some(port) = parse_var(lookup, ENV_HTTP_PORT)? {
            self.gateway.http.port = port;
        }
        if let Some(backend) = parse_var(lookup, ENV_STORAGE_BACKEND)? {
            self.storage.backend = backend;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(max) = parse_var::<usize, _>(lookup, ENV_MAX_PAGE_SIZE)? {
            self.gateway.limits.max_page_size = max;
            self.gateway.limits.default_page_size = self.gateway.limits.default_page_size.min(max);
        }
        Ok(())
    }

    /// Validate the gateway section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                name,
                value: raw,
                reason: e.to_string(),
            }),
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which key-value store backs the entities.
    pub backend: StorageBackend,
    /// Data directory for the file and RocksDB backends.
    pub data_dir: PathBuf,
    /// Fsync every RocksDB write.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
            sync_writes: true,
        }
    }
}

/// Key-value store selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on exit.
    Memory,
    /// Single write-through file under the data directory.
    File,
    /// RocksDB under the data directory (requires the `rocksdb` feature).
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(format!(
                "unknown storage backend '{other}' (expected memory, file or rocksdb)"
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::RocksDb => "rocksdb",
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment override did not parse.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The config file could not be read or parsed.
    #[error("cannot load config file {}: {reason}", path.display())]
    File { path: PathBuf, reason: String },

    /// The assembled gateway configuration is invalid.
    #[error(transparent)]
    Gateway(#[from] fd_02_api_gateway::ConfigError),
}
