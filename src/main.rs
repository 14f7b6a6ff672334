//! Roster: a JSON-file backed record service.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration, opens the record store, builds the Axum router and starts
//! the HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster::config::{AppConfig, DEFAULT_LOG_FILTER};
use roster::http::start_server;
use roster::store::JsonFileStore;
use roster::{create_router, AppState};

/// Roster: a JSON-file backed record service
#[derive(Parser, Debug)]
#[command(name = "roster", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "roster=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration first so the log format is known before tracing starts
    let config = AppConfig::load(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        data_file = %config.storage.data_file.display(),
        public_dir = %config.storage.public_dir.display(),
        port = config.http.port,
        "Loaded configuration"
    );

    let store = JsonFileStore::new(&config.storage.data_file);
    let state = AppState::new(store);
    let app = create_router(state, &config.storage.public_dir);

    start_server(app, &config.http).await?;

    Ok(())
}
