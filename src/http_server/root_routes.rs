//! Informational HTTP Routes
//!
//! The fixed landing payload and a health check.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use super::response::{HealthResponse, HomeResponse};

/// Create informational routes
pub fn root_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
}

/// Landing handler
async fn home_handler() -> Json<HomeResponse> {
    Json(HomeResponse::default())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
