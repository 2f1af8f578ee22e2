//! CLI argument definitions using clap
//!
//! Commands:
//! - marine-experiments serve [--config <path>] [--port <port>] [--in-memory]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marine experiments HTTP API
#[derive(Parser, Debug)]
#[command(name = "marine-experiments")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,

        /// Serve a built-in sample dataset instead of connecting to PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
