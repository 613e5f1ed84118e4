//! # Node Runtime
//!
//! Opens the store, builds the gateway and serves until shutdown.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file, then `FD_*` environment overrides)
//! 2. Open the storage backend and lock the data directory
//! 3. Build the API gateway over the shared store
//! 4. Serve HTTP until the shutdown future resolves

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::container::{NodeConfig, ServiceContainer};

/// The node runtime: one store, one HTTP gateway.
pub struct NodeRuntime {
    container: ServiceContainer,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Create a runtime; fails if the store cannot be opened.
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!("[node] Creating FMV Dispute Desk runtime");
        let container = ServiceContainer::new(config)?;
        Ok(Self::from_container(container))
    }

    /// Wrap an already assembled container.
    pub fn from_container(container: ServiceContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container,
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// Handle that stops [`NodeRuntime::run`] when sent `true`.
    pub fn shutdown_handle(&self) -> watch::Sender<bool> {
        self.shutdown_tx.clone()
    }

    /// Bind the configured address and serve until `signal` resolves or the
    /// shutdown handle fires.
    pub async fn run<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.container.config.gateway.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("cannot bind {addr}"))?;
        self.serve(listener, signal).await
    }

    /// Serve on an already bound listener.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.log_banner();

        let gateway = self.container.gateway()?;
        let mut rx = self.shutdown_rx.clone();
        let shutdown = async move {
            tokio::select! {
                _ = signal => {}
                _ = async {
                    while rx.changed().await.is_ok() {
                        if *rx.borrow() {
                            break;
                        }
                    }
                } => {}
            }
            info!("[node] Shutdown signal received");
        };

        let result = gateway.serve(listener, shutdown).await;
        if let Err(e) = &result {
            error!("[node] Gateway stopped with error: {}", e);
        }
        // Keeps the data-directory lock until the server is gone.
        drop(self.container);
        info!("[node] Shutdown complete");
        result.context("API gateway failed")
    }

    fn log_banner(&self) {
        let config = &self.container.config;
        info!("===========================================");
        info!("  FMV Dispute Desk v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!("HTTP: {}", config.gateway.http_addr());
        info!("Storage: {}", config.storage.backend);
        info!("Data Dir: {:?}", config.storage.data_dir);
        match self.container.entity_counts() {
            Ok((disputes, users)) => info!("Stored: {} disputes, {} users", disputes, users),
            Err(e) => error!("[node] Cannot read entity indexes: {:#}", e),
        }
    }
}
