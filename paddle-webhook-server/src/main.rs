//! Paddle Webhook Server
//!
//! Receives Paddle Classic webhooks, authenticates them against the vendor's
//! public key and logs the decoded events.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Paddle Webhook Server - authenticated receiver for Paddle Classic webhooks
#[derive(Parser, Debug)]
#[command(name = "paddle-webhook-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./paddle-webhook.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Override the path of Paddle's webhook public key (PEM)
    #[arg(long, env = "PADDLE_PUBLIC_KEY_PATH")]
    public_key: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting paddle-webhook-server v{}", env!("CARGO_PKG_VERSION"));

    // A key that fails to load is fatal; requests are never served without one.
    let loaded_config = ConfigLoader::new(&args.config, args.listen)
        .with_public_key_path(args.public_key)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::info!(
        vendor_id = loaded_config.vendor_id,
        "Configuration loaded from {:?}",
        args.config
    );

    let listen_addr = loaded_config.listen;
    let state = AppState::new(loaded_config.public_key, loaded_config.vendor_id);
    let router = build_router(state, loaded_config.body_limit);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    run_server(router, listen_addr).await?;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
