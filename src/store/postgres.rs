//! # PostgreSQL Store
//!
//! Runs the fixed queries over a single connection held for the process
//! lifetime. Statements are serialized through a mutex; there is no pool.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls, Row};

use crate::models::{format_percentage, Experiment, ExperimentFilter, Subject};

use super::config::DatabaseConfig;
use super::errors::{StoreError, StoreResult};
use super::query::{self, BuiltQuery};
use super::ExperimentStore;

/// PostgreSQL-backed experiment store
pub struct PostgresStore {
    client: Mutex<Client>,
}

impl PostgresStore {
    /// Open the connection described by `config`.
    ///
    /// The connection driver runs on a spawned task. If it fails, the error
    /// is logged and later queries return [`StoreError::Query`].
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let (client, connection) = config
            .pg_config()?
            .connect(NoTls)
            .await
            .map_err(|e| StoreError::Connect(format!("{}: {}", config.display_target(), e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "database connection closed");
            }
        });

        tracing::info!(database = %config.display_target(), "connected to database");
        Ok(Self::from_client(client))
    }

    /// Wrap an already-established client
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }

    async fn fetch(&self, built: &BuiltQuery) -> StoreResult<Vec<Row>> {
        let client = self.client.lock().await;
        let rows = client.query(built.sql.as_str(), &built.driver_params()).await?;
        Ok(rows)
    }
}

fn column<'a, T>(row: &'a Row, name: &str) -> StoreResult<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(name).map_err(|e| StoreError::invalid_row(name, e))
}

fn subject_from_row(row: &Row) -> StoreResult<Subject> {
    Ok(Subject {
        subject_id: column(row, "subject_id")?,
        subject_name: column(row, "subject_name")?,
        species_name: column(row, "species_name")?,
        date_of_birth: column(row, "date_of_birth")?,
    })
}

fn experiment_from_row(row: &Row) -> StoreResult<Experiment> {
    let score: f64 = column(row, "score")?;
    Ok(Experiment {
        experiment_id: column(row, "experiment_id")?,
        subject_id: column(row, "subject_id")?,
        experiment_date: column(row, "experiment_date")?,
        species: column(row, "species")?,
        experiment_type: column(row, "experiment_type")?,
        score: format_percentage(score),
    })
}

#[async_trait]
impl ExperimentStore for PostgresStore {
    async fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        let rows = self.fetch(&query::list_subjects()).await?;
        rows.iter().map(subject_from_row).collect()
    }

    async fn list_experiments(&self, filter: &ExperimentFilter) -> StoreResult<Vec<Experiment>> {
        let rows = self.fetch(&query::list_experiments(filter)).await?;
        rows.iter().map(experiment_from_row).collect()
    }

    async fn get_experiment_by_id(&self, experiment_id: i64) -> StoreResult<Option<Experiment>> {
        let rows = self.fetch(&query::experiment_by_id(experiment_id)).await?;
        rows.first().map(experiment_from_row).transpose()
    }

    async fn delete_experiment(&self, experiment_id: i64) -> StoreResult<bool> {
        let built = query::delete_experiment(experiment_id);
        let client = self.client.lock().await;
        // Autocommit: the delete is durable once execute returns.
        let deleted = client.execute(built.sql.as_str(), &built.driver_params()).await?;
        Ok(deleted > 0)
    }
}
