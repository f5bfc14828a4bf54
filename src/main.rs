//! ikas backend-for-frontend proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!  Browser                 BFF                                     ikas
//!  ───────                 ───                                     ────
//!  POST /api/ikas ──▶ http handlers ──▶ graphql forwarder ──────▶ admin GraphQL API
//!  GET  /api/...           │                   │
//!                          │                   ▼
//!                          │            token manager ──────────▶ store /oauth/token
//!                          ▼            (cached, 90% lifetime)
//!                   attribute catalog
//!                   (id → name, loaded at startup)
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use ikas_bff::config::{self, BffConfig};
use ikas_bff::lifecycle::{signals, Shutdown};
use ikas_bff::observability::{logging, metrics};
use ikas_bff::HttpServer;

#[derive(Parser)]
#[command(name = "ikas-bff")]
#[command(about = "Backend-for-frontend proxy for the ikas admin GraphQL API", long_about = None)]
struct Args {
    /// Optional TOML config file. Environment variables override its values.
    #[arg(short, long, env = "BFF_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config: BffConfig = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::loader::from_env()?,
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("ikas-bff v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_url = ?config.upstream.resolved_store_url(),
        graphql_url = %config.upstream.graphql_url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
