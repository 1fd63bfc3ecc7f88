//! CLI module for studymate
//!
//! Provides command-line interface for:
//! - serve: Open the document store and serve the HTTP API
//! - check-config: Validate configuration and print effective values

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_state, check_config, open_store, run, run_command, serve};
pub use config::{Config, DatabaseConfig, StoreBackend};
pub use errors::{CliError, CliErrorCode, CliResult};
