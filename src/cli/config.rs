//! Service configuration file
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 8000 },
//!   "database": { "dbname": "marine_experiments", "user": "postgres" }
//! }
//! ```
//!
//! Every field is optional. `MARINE_DB_*` environment variables override the
//! database section.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::store::DatabaseConfig;

use super::errors::{CliError, CliResult};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl ServiceConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: ServiceConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values that cannot work
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.database.dbname.trim().is_empty() {
            return Err(CliError::config_error("database.dbname must not be empty"));
        }

        if self.database.host.trim().is_empty() {
            return Err(CliError::config_error("database.host must not be empty"));
        }

        Ok(())
    }
}
