//! Gateway Entry Point
//!
//! This is the main entry point for the gateway. It initializes logging,
//! loads configuration, builds the manager registry, and starts the HTTP
//! transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use rest_gateway::core::{Config, Gateway, HttpTransport};
use rest_gateway::domains::managers::{MemoryStore, default_registry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Build the store and the manager registry
    let store = Arc::new(MemoryStore::new());
    let registry = default_registry(store);

    info!(resources = ?registry.names(), "Registry initialized");

    // Create and run the HTTP transport
    let transport = HttpTransport::new(config.http.clone());
    let gateway = Gateway::new(config, registry);
    transport.run(gateway).await?;

    info!("Gateway shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
