//! http-responder server.
//!
//! ```text
//! client ──▶ request id ──▶ trace ──▶ timeout ──▶ router
//!                                                 │
//!                      ┌──────────────────────────┼───────────────────┐
//!                      ▼                          ▼                   ▼
//!              redirect rules             download directory      404 fallback
//!                      │                          │                   │
//!                      └──────────── Responder ───┴───────────────────┘
//!                                 error | redirect | download
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_responder::config::{load_config, ResponderConfig};
use http_responder::lifecycle::signals::shutdown_on_signal;
use http_responder::observability::{logging, metrics};
use http_responder::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "http-responder")]
#[command(about = "Serve configured redirects and file downloads", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ResponderConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("http-responder v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        redirect_rules = config.redirects.len(),
        downloads = config.downloads.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
