//! # HTTP Server
//!
//! Combines the item and health routers, applies CORS and request tracing,
//! and serves until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::rest_api::{item_routes, AppState, SharedState};
use crate::storage::ItemStore;

use super::config::ServiceConfig;
use super::health_routes::health_routes;

/// HTTP server for the item service
pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server around an already connected store
    pub fn new(config: ServiceConfig, store: ItemStore) -> Self {
        let state = Arc::new(AppState::new(store, config.page_limits()));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServiceConfig, state: SharedState) -> Router {
        Router::new()
            .merge(health_routes(state.clone()))
            .merge(item_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors_origins))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C or SIGTERM, then drain in-flight requests
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!("Item service listening on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Item service stopped");
        Ok(())
    }
}

/// CORS policy from the configured origins.
///
/// No origins (or `*`) means any origin, without credentials. A configured
/// list allows credentials; methods and headers are then mirrored from the
/// preflight request since wildcards are not allowed with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_store(tmp: &TempDir) -> ItemStore {
        let url = format!("sqlite://{}?mode=rwc", tmp.path().join("items.db").display());
        ItemStore::connect(&url, 1).await.unwrap()
    }

    #[tokio::test]
    async fn test_server_with_custom_port() {
        let tmp = TempDir::new().unwrap();
        let server = HttpServer::new(ServiceConfig::with_port(8080), setup_store(&tmp).await);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_router_builds_without_origins() {
        let tmp = TempDir::new().unwrap();
        let config = ServiceConfig {
            cors_origins: Vec::new(),
            ..Default::default()
        };
        let _router = HttpServer::new(config, setup_store(&tmp).await).router();
    }
}
