//! # Data Access Layer
//!
//! The fixed queries the service issues against the experiments database.
//!
//! - [`PostgresStore`] runs them over one long-lived PostgreSQL connection
//! - [`InMemoryStore`] applies the same semantics to an in-process dataset

pub mod config;
pub mod errors;
pub mod memory;
pub mod postgres;
pub mod query;

pub use config::DatabaseConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Experiment, ExperimentFilter, Subject};

/// Read/delete access to subjects and experiments
#[async_trait]
pub trait ExperimentStore: Send + Sync {
    /// All subjects joined with their species, newest birth date first.
    ///
    /// An empty store yields an empty list.
    async fn list_subjects(&self) -> StoreResult<Vec<Subject>>;

    /// Experiments narrowed by `filter`, most recent first.
    async fn list_experiments(&self, filter: &ExperimentFilter) -> StoreResult<Vec<Experiment>>;

    /// A single experiment, or `None` if no row has this id.
    async fn get_experiment_by_id(&self, experiment_id: i64) -> StoreResult<Option<Experiment>>;

    /// Remove an experiment. Returns whether a row was deleted.
    async fn delete_experiment(&self, experiment_id: i64) -> StoreResult<bool>;
}

/// Store handle shared across request handlers
pub type SharedStore = Arc<dyn ExperimentStore>;
