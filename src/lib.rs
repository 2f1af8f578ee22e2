//! marine-experiments - HTTP API over the marine experiments database
//!
//! Read access to subjects and experiments, with optional filtering, plus
//! deletion of single experiments.

pub mod cli;
pub mod http_server;
pub mod models;
pub mod store;
pub mod telemetry;
