//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::store::{InMemoryStore, PostgresStore, SharedStore};
use crate::telemetry;

use super::args::Command;
use super::config::ServiceConfig;
use super::errors::{CliError, CliResult};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            in_memory,
        } => serve(config.as_deref(), port, in_memory),
    }
}

/// Start the HTTP server
///
/// 1. Load configuration and apply environment overrides
/// 2. Open the single store connection (or the in-memory sample dataset)
/// 3. Serve until the process stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    let mut config = ServiceConfig::load_or_default(config_path)?;
    config.database.apply_env();
    if let Some(port) = port {
        config.http.port = port;
    }
    config.validate()?;

    telemetry::init();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let store = open_store(&config, in_memory).await?;
        let server = HttpServer::with_config(store, config.http.clone());
        server.start().await?;
        Ok::<(), CliError>(())
    })
}

async fn open_store(config: &ServiceConfig, in_memory: bool) -> CliResult<SharedStore> {
    if in_memory {
        tracing::warn!("serving the in-memory sample dataset");
        return Ok(Arc::new(InMemoryStore::with_sample_data()));
    }

    let store = PostgresStore::connect(&config.database)
        .await
        .map_err(|e| CliError::boot_failed(e.to_string()))?;
    Ok(Arc::new(store))
}
