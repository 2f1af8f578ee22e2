//! # HTTP Server Module
//!
//! Request handler layer for the experiments API.
//!
//! # Endpoints
//!
//! - `GET /` - Fixed informational payload
//! - `GET /health` - Health check
//! - `GET /subject` - All subjects, newest first
//! - `GET /experiment` - Experiments, optionally filtered by `type` and `score_over`
//! - `DELETE /experiment/{id}` - Delete one experiment

pub mod config;
pub mod errors;
pub mod experiment_routes;
pub mod params;
pub mod response;
pub mod root_routes;
pub mod server;
pub mod subject_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
