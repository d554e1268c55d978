//! # Patent-Notary Node
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load and validate configuration from `PN_*` variables
//! 3. Connect to the ledger and wire the subsystems
//! 4. Serve the HTTP API until Ctrl+C

use anyhow::{Context, Result};
use node_runtime::{NodeConfig, NodeContainer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("===========================================");
    info!("  Patent-Notary v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env().context("failed to load configuration")?;
    let container = NodeContainer::connect(config)
        .await
        .context("failed to start subsystems")?;
    let gateway = container.gateway()?;

    info!(
        addr = %container.config.gateway.http_addr(),
        genesis_block = container.config.genesis_block,
        "Node is running. Press Ctrl+C to stop."
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
        }
        info!("Shutdown signal received");
    };
    gateway.serve(shutdown).await?;

    Ok(())
}
