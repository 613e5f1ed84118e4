//! # Services
//!
//! The store handle shared by every request plus the lock that keeps a
//! second node off the same data directory.

use std::sync::Arc;

use anyhow::{Context, Result};
use fd_01_entity_store::{entities, DynKVStore, StoreContext, TimeSource};
use fd_02_api_gateway::ApiGatewayService;
use tracing::info;

use crate::adapters::{open_store, DataDirLock, OpenedStore};
use crate::container::config::NodeConfig;

/// Central container holding the store and its configuration.
pub struct ServiceContainer {
    /// Configuration the container was built from.
    pub config: NodeConfig,
    ctx: StoreContext<DynKVStore>,
    // Held for the container's lifetime; released on drop.
    _lock: Option<DataDirLock>,
}

impl ServiceContainer {
    /// Open the configured store with the system clock.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let opened = open_store(&config.storage).with_context(|| {
            format!(
                "cannot open {} store in {}",
                config.storage.backend,
                config.storage.data_dir.display()
            )
        })?;
        let OpenedStore { kv, lock } = opened;
        Ok(Self::assemble(config, StoreContext::with_system_clock(kv), lock))
    }

    /// Build over an already opened store and an explicit clock.
    pub fn with_store(config: NodeConfig, opened: OpenedStore, clock: Arc<dyn TimeSource>) -> Self {
        let OpenedStore { kv, lock } = opened;
        Self::assemble(config, StoreContext::new(kv, clock), lock)
    }

    fn assemble(
        config: NodeConfig,
        ctx: StoreContext<DynKVStore>,
        lock: Option<DataDirLock>,
    ) -> Self {
        info!(
            "[node] Store ready (backend: {}, locked: {})",
            config.storage.backend,
            lock.is_some()
        );
        Self {
            config,
            ctx,
            _lock: lock,
        }
    }

    /// Shared store context; clones see the same store.
    pub fn context(&self) -> StoreContext<DynKVStore> {
        self.ctx.clone()
    }

    /// Number of indexed disputes and users currently stored.
    pub fn entity_counts(&self) -> Result<(usize, usize)> {
        let disputes = entities::disputes(self.context())
            .index()
            .load()
            .context("cannot read dispute index")?
            .len();
        let users = entities::users(self.context())
            .index()
            .load()
            .context("cannot read user index")?
            .len();
        Ok((disputes, users))
    }

    /// Build the HTTP gateway over the shared store.
    pub fn gateway(&self) -> Result<ApiGatewayService> {
        ApiGatewayService::new(self.config.gateway.clone(), self.context())
            .context("cannot build API gateway")
    }
}
