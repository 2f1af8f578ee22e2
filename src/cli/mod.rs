//! CLI module
//!
//! Provides the `serve` command: load configuration, open the store and run
//! the HTTP server.

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve};
pub use config::ServiceConfig;
pub use errors::{CliError, CliResult};
