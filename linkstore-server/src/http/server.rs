//! Axum server setup
//!
//! Server skeleton with:
//! - Optional open CORS on the link endpoint
//! - Tracing middleware
//! - Per-request timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::LinkStore;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Link endpoint behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHandlerConfig {
    /// Open CORS on the link path: OPTIONS answered, `Access-Control-*` on every response
    pub cors: bool,

    /// Reject PUT bodies without a `label`
    pub require_label_on_update: bool,
}

impl Default for LinkHandlerConfig {
    fn default() -> Self {
        Self {
            cors: true,
            require_label_on_update: false,
        }
    }
}

impl LinkHandlerConfig {
    /// Value of the `Allow` header on 405 responses
    pub fn allowed_methods(&self) -> &'static str {
        if self.cors {
            "GET, POST, PUT, DELETE, OPTIONS"
        } else {
            "GET, POST, PUT, DELETE"
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Requests running longer than this are aborted with 408
    pub request_timeout: Duration,

    pub links: LinkHandlerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            links: LinkHandlerConfig::default(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn LinkStore>,
    pub links: LinkHandlerConfig,
}

/// Build the application router with all routes and middleware.
pub fn build_router(store: Arc<dyn LinkStore>, config: &ServerConfig) -> Router {
    let state = AppState {
        store,
        links: config.links.clone(),
    };

    // CORS is applied inside the link router; health stays same-origin
    Router::new()
        .merge(routes::health::router())
        .merge(routes::links::router(&config.links))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = ConnectionPool::connect(&dsn, &PoolSettings::default()).await?;
/// let store = Arc::new(PgLinkStore::new(pool, IdStrategy::Uuid));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn LinkStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    if config.links.cors {
        tracing::warn!("CORS: all origins allowed on the link endpoint");
    }
    tracing::info!(
        id_strategy = %store.id_strategy(),
        require_label_on_update = config.links.require_label_on_update,
        "link handler configured"
    );

    let app = build_router(store, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryLinkStore;
    use crate::models::IdStrategy;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.links.cors);
        assert!(!config.links.require_label_on_update);
    }

    #[test]
    fn allowed_methods_follow_cors() {
        let mut links = LinkHandlerConfig::default();
        assert!(links.allowed_methods().ends_with("OPTIONS"));
        links.cors = false;
        assert_eq!(links.allowed_methods(), "GET, POST, PUT, DELETE");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let app = build_router(
            Arc::new(MemoryLinkStore::new(IdStrategy::Uuid)),
            &ServerConfig::default(),
        );

        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
