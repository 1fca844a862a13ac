//! Axum server setup
//!
//! Server skeleton with CORS, tracing, per-request timeout and graceful
//! shutdown on SIGTERM/Ctrl+C. The database pool is built here and
//! handed to handlers through [`AppState`]; there is no global engine
//! state.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db;

use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// SQLite database file path
    pub db_path: PathBuf,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            db_path: PathBuf::from("cofound.db"),
            timeout_secs: 30,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, timeout_secs: u64) -> Router {
    // CORS for local development: the API has no cookie-based auth to protect
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::users::router())
        .merge(routes::companies::router())
        .merge(routes::posts::router())
        .merge(routes::cards::router())
        .merge(routes::subscriptions::router())
        .merge(routes::favorites::router())
        .merge(routes::admin::router())
        .layer(middleware)
        .with_state(state)
}

/// Run the HTTP server.
///
/// Opens the database, applies migrations, then serves until a shutdown
/// signal arrives.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("opening database at {}", config.db_path.display());
    let pool = db::connect(&config.db_path).await?;
    db::migrations::run(&pool).await?;

    let state = AppState { pool };
    let app = create_router(state, config.timeout_secs);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("cofound server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            warn!("received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
pub(crate) mod test_app {
    use super::*;
    use crate::db::test_support;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response};
    use serde_json::Value;
    use tower::ServiceExt;

    /// Router over a fresh in-memory database.
    pub async fn app() -> Router {
        let pool = test_support::pool().await;
        create_router(AppState { pool }, 30)
    }

    /// Drive one request through the router.
    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        app.clone().oneshot(request).await.unwrap()
    }

    /// Read a response body as JSON.
    pub async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
