//! # API Errors
//!
//! Error taxonomy for request handlers and its mapping to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Request handling errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// `type` is not a known experiment type
    #[error("Invalid value for type parameter")]
    InvalidType,

    /// `score_over` is an integer outside `[0, 100)`
    #[error("Invalid value for score_over parameter")]
    InvalidScoreOver,

    /// `score_over` is not an integer
    #[error("Invalid type value for score_over parameter")]
    InvalidScoreOverType,

    /// Subject listing came back empty
    #[error("No subjects found")]
    NoSubjects,

    /// Experiment listing came back empty
    #[error("No experiments found")]
    NoExperiments,

    /// No experiment row matched the requested id
    #[error("Experiment could not be deleted")]
    ExperimentNotDeleted,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Database failure; the cause is logged, not returned
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidType => StatusCode::BAD_REQUEST,
            ApiError::InvalidScoreOver => StatusCode::BAD_REQUEST,
            ApiError::InvalidScoreOverType => StatusCode::BAD_REQUEST,

            ApiError::NoSubjects => StatusCode::NOT_FOUND,
            ApiError::NoExperiments => StatusCode::NOT_FOUND,
            ApiError::ExperimentNotDeleted => StatusCode::NOT_FOUND,

            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(cause) = &self {
            tracing::error!(error = %cause, "store operation failed");
        }
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
