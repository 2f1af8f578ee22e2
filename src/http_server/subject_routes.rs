//! Subject HTTP Routes

use axum::{extract::State, routing::get, Json, Router};

use crate::store::SharedStore;

use super::errors::{ApiError, ApiResult};
use super::response::SubjectResponse;

/// Create subject routes
pub fn subject_routes() -> Router<SharedStore> {
    Router::new().route("/subject", get(list_subjects_handler))
}

/// `GET /subject`: every subject, newest first. Empty is a 404.
async fn list_subjects_handler(
    State(store): State<SharedStore>,
) -> ApiResult<Json<Vec<SubjectResponse>>> {
    let subjects = store.list_subjects().await?;

    if subjects.is_empty() {
        return Err(ApiError::NoSubjects);
    }

    Ok(Json(subjects.into_iter().map(SubjectResponse::from).collect()))
}
