//! # Store Errors
//!
//! Error types for the data access layer.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Data access errors
///
/// None of these are retried. Handlers surface them as 500 responses.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not establish the database connection
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Statement failed or the connection was lost
    #[error("Query failed: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A row did not decode into the expected record shape
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// The in-process dataset lock was poisoned
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap a column decoding failure
    pub fn invalid_row(column: &str, err: impl std::fmt::Display) -> Self {
        StoreError::InvalidRow(format!("column '{}': {}", column, err))
    }
}
