//! CLI command implementations
//!
//! `serve` startup order: configuration, logging, credentials, document
//! store, HTTP server. Any failure before the server binds aborts startup.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::credentials::ServiceAccount;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::rest_api::AppState;
use crate::store::{DocumentStore, InMemoryStore, MongoStore};

use super::args::Command;
use super::config::{Config, DatabaseConfig, StoreBackend};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Serve the HTTP API until shutdown
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    init_logging(&config.log).map_err(CliError::boot_failed)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        let state = build_state(&config).await?;

        HttpServer::new(config.http, Arc::new(state))
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Load credentials and open the document store
pub async fn build_state(config: &Config) -> CliResult<AppState> {
    let credentials = match &config.credentials_path {
        Some(path) => {
            let account = ServiceAccount::load(path)?;
            info!(project_id = %account.project_id, "Loaded service account credentials");
            Some(Arc::new(account))
        }
        None => None,
    };

    let store = open_store(&config.database).await?;

    Ok(AppState::new(store)
        .with_collections(config.database.collection_names())
        .with_credentials(credentials))
}

/// Open the configured backend. MongoDB is pinged before returning.
pub async fn open_store(config: &DatabaseConfig) -> CliResult<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Mongodb => {
            let store = MongoStore::connect(&config.uri, &config.name).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("Using in-memory document store; data is lost on exit");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Validate configuration (and credentials, when configured) and print it
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;

    let credentials_project = match &config.credentials_path {
        Some(path) => Some(ServiceAccount::load(path)?.project_id),
        None => None,
    };

    write_json(&json!({
        "valid": true,
        "config": config.redacted(),
        "credentials_project_id": credentials_project,
    }))
}
