//! # HTTP Server
//!
//! Combines the endpoint routers around one injected store handle.

use std::io;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::SharedStore;

use super::config::HttpServerConfig;
use super::experiment_routes::experiment_routes;
use super::root_routes::root_routes;
use super::subject_routes::subject_routes;

/// HTTP server for the experiments API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(store: SharedStore) -> Self {
        Self::with_config(store, HttpServerConfig::default())
    }

    /// Create a server with custom configuration
    pub fn with_config(store: SharedStore, config: HttpServerConfig) -> Self {
        let router = build_router(store, &config);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process stops
    pub async fn start(self) -> io::Result<()> {
        let addr = self.config.listen_addr().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "marine experiments API listening");

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(store: SharedStore, config: &HttpServerConfig) -> Router {
    Router::<SharedStore>::new()
        .merge(root_routes::<SharedStore>())
        .merge(subject_routes())
        .merge(experiment_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(store)
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(config.allowed_origins())
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::InMemoryStore;

    fn store() -> SharedStore {
        Arc::new(InMemoryStore::new())
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(store(), config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(store(), config).router();
    }
}
