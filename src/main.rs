//! Articles gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 ARTICLES GATEWAY                 │
//!   Client Request    │  ┌────────┐   ┌──────────┐   ┌───────────────┐   │
//!   ──────────────────┼─▶│  http  │──▶│ articles │──▶│   upstream    │───┼──▶ Record
//!                     │  │ server │   │ service  │   │ (HTTP client) │   │    Store
//!   Client Response   │  └────────┘   └────┬─────┘   └───────────────┘   │
//!   ◀─────────────────┼──────────────      │                           │
//!                     │               ┌────▼───────┐                     │
//!                     │               │ validation │                     │
//!                     │               └────────────┘                     │
//!                     │  config · observability · lifecycle              │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use articles_gateway::config::{self, ConfigError, GatewayConfig};
use articles_gateway::observability::{self, metrics};
use articles_gateway::{GatewayServer, HttpRecordStore, Shutdown};

#[derive(Parser)]
#[command(name = "articles-gateway")]
#[command(about = "Validating HTTP gateway in front of the articles record store", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(long)]
    upstream_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(url) = self.upstream_url {
            config.upstream.base_url = url;
        }

        config::validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    observability::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        "articles-gateway starting"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let store = HttpRecordStore::new(&config.upstream)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
