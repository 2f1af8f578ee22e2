//! Experiment HTTP Routes
//!
//! Filtered listing and deletion by id.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};

use crate::store::SharedStore;

use super::errors::{ApiError, ApiResult};
use super::params::parse_experiment_filter;
use super::response::{ExperimentResponse, MessageResponse};

/// Create experiment routes
pub fn experiment_routes() -> Router<SharedStore> {
    Router::new()
        .route("/experiment", get(list_experiments_handler))
        .route("/experiment/:id", delete(delete_experiment_handler))
}

/// `GET /experiment?type=..&score_over=..`
async fn list_experiments_handler(
    State(store): State<SharedStore>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<ExperimentResponse>>> {
    let filter = parse_experiment_filter(&query)?;
    let experiments = store.list_experiments(&filter).await?;

    if experiments.is_empty() {
        return Err(ApiError::NoExperiments);
    }

    Ok(Json(
        experiments
            .into_iter()
            .map(ExperimentResponse::from)
            .collect(),
    ))
}

/// `DELETE /experiment/{id}`
///
/// A non-numeric id can never match a row, so it is reported like a
/// missing one.
async fn delete_experiment_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let experiment_id: i64 = id.trim().parse().map_err(|_| ApiError::ExperimentNotDeleted)?;

    if store.get_experiment_by_id(experiment_id).await?.is_none() {
        return Err(ApiError::ExperimentNotDeleted);
    }

    if !store.delete_experiment(experiment_id).await? {
        return Err(ApiError::ExperimentNotDeleted);
    }

    tracing::info!(experiment_id, "experiment deleted");
    Ok(Json(MessageResponse::new("Experiment deleted")))
}
