//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("MARINE_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Store or runtime could not be started
    #[error("MARINE_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),

    /// Server stopped with an error
    #[error("MARINE_CLI_SERVER_FAILED: {0}")]
    Server(#[from] io::Error),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        CliError::BootFailed(msg.into())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
