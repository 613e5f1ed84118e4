//! # FMV Dispute Desk Node
//!
//! Entry point: configure logging, load configuration, serve until Ctrl+C.
//!
//! Logging honours `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{NodeConfig, NodeRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env().context("invalid configuration")?;

    let runtime = NodeRuntime::new(config)?;
    info!("Node is running. Press Ctrl+C to stop.");

    runtime
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("[node] Cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
}
