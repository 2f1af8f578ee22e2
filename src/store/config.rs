//! Database Configuration
//!
//! Connection settings for the backing PostgreSQL database.

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Environment variable overriding [`DatabaseConfig::host`]
pub const ENV_DB_HOST: &str = "MARINE_DB_HOST";
/// Environment variable overriding [`DatabaseConfig::port`]
pub const ENV_DB_PORT: &str = "MARINE_DB_PORT";
/// Environment variable overriding [`DatabaseConfig::dbname`]
pub const ENV_DB_NAME: &str = "MARINE_DB_NAME";
/// Environment variable overriding [`DatabaseConfig::user`]
pub const ENV_DB_USER: &str = "MARINE_DB_USER";
/// Environment variable overriding [`DatabaseConfig::password`]
pub const ENV_DB_PASSWORD: &str = "MARINE_DB_PASSWORD";

/// PostgreSQL connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Host to connect to (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to connect to (default: 5432)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name (default: "marine_experiments")
    #[serde(default = "default_dbname")]
    pub dbname: String,

    /// Role to connect as (default: "postgres")
    #[serde(default = "default_user")]
    pub user: String,

    /// Password for `user` (default: "postgres")
    #[serde(default = "default_password")]
    pub password: String,
}

/// Single-quote a value when libpq would otherwise split or misread it
fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "marine_experiments".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_password() -> String {
    "postgres".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: default_password(),
        }
    }
}

impl DatabaseConfig {
    /// Override fields from `MARINE_DB_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override fields from an arbitrary key lookup.
    ///
    /// Unparseable port values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_DB_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_DB_PORT).and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(dbname) = lookup(ENV_DB_NAME) {
            self.dbname = dbname;
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_DB_PASSWORD) {
            self.password = password;
        }
    }

    /// Render the libpq key/value connection string
    ///
    /// `host=localhost port=5432 dbname=marine_experiments user=postgres password=postgres`
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_value(&self.host),
            self.port,
            quote_value(&self.dbname),
            quote_value(&self.user),
            quote_value(&self.password)
        )
    }

    /// Parse [`connection_string`](Self::connection_string) into the driver configuration
    pub fn pg_config(&self) -> StoreResult<tokio_postgres::Config> {
        self.connection_string()
            .parse::<tokio_postgres::Config>()
            .map_err(|e| StoreError::Connect(format!("{}: {}", self.display_target(), e)))
    }

    /// Connection target without credentials, for logging
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.dbname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "marine_experiments");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_HOST, "db.internal"),
            (ENV_DB_PORT, "6543"),
            (ENV_DB_PASSWORD, "secret"),
        ]
        .into_iter()
        .collect();

        let mut config = DatabaseConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.password, "secret");
        assert_eq!(config.user, "postgres");
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = DatabaseConfig::default();
        config.apply_overrides(|key| (key == ENV_DB_PORT).then(|| "not-a-port".to_string()));
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn test_display_target_hides_password() {
        let mut config = DatabaseConfig::default();
        config.password = "hunter2".to_string();
        let target = config.display_target();
        assert_eq!(target, "postgres@localhost:5432/marine_experiments");
        assert!(!target.contains("hunter2"));
    }

    #[test]
    fn test_connection_string_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(
            config.connection_string(),
            "host=localhost port=5432 dbname=marine_experiments user=postgres password=postgres"
        );
    }

    #[test]
    fn test_connection_string_quotes_special_values() {
        let mut config = DatabaseConfig::default();
        config.password = "it's a secret".to_string();
        config.user = String::new();

        let rendered = config.connection_string();
        assert!(rendered.ends_with(r"user='' password='it\'s a secret'"));
    }

    #[test]
    fn test_pg_config_parses_connection_string() {
        let mut config = DatabaseConfig::default();
        config.port = 6543;
        config.password = "two words".to_string();

        let pg = config.pg_config().unwrap();
        assert_eq!(pg.get_dbname(), Some("marine_experiments"));
        assert_eq!(pg.get_user(), Some("postgres"));
        assert_eq!(pg.get_ports(), &[6543]);
        assert_eq!(pg.get_password(), Some("two words".as_bytes()));
    }

    #[test]
    fn test_partial_json() {
        let config: DatabaseConfig = serde_json::from_str(r#"{"dbname": "armada"}"#).unwrap();
        assert_eq!(config.dbname, "armada");
        assert_eq!(config.port, 5432);
    }
}
