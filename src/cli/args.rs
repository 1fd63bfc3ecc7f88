//! CLI argument definitions using clap
//!
//! Commands:
//! - studymate serve [--config <path>] [--port <port>]
//! - studymate check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// studymate - REST backend for study-partner users and partner requests
#[derive(Parser, Debug)]
#[command(name = "studymate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the document store and serve the HTTP API
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate configuration, print the effective values and exit
    CheckConfig {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
