//! Contact List API server.
//!
//! A small CRUD service for a contact list, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ────────────────▶ http::server ──▶ http::handlers ──▶ contacts::service ──▶ storage
//!                       (middleware)     (parse, map        (validation, ids,     (JSON file,
//!                                         errors)            queries, lock)        whole-file
//!     Client Response                                                              rewrite)
//!     ◀──────────────── JSON body / {"error": ...}
//!
//!     Cross-cutting: config · observability (logs, metrics) · lifecycle (shutdown)
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use contact_list_api::config::{self, ServiceConfig};
use contact_list_api::lifecycle::{shutdown_signal, Shutdown};
use contact_list_api::observability::{logging, metrics};
use contact_list_api::HttpServer;

#[derive(Parser)]
#[command(name = "contact-list-api")]
#[command(about = "Contact list HTTP service backed by a JSON file", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `storage.path`.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(data) = args.data {
        config.storage.path = data;
    }
    config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("contact-list-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage = %config.storage.path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
