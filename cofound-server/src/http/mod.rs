//! HTTP server layer
//!
//! Axum server with:
//! - CORS (permissive, local development tool)
//! - Request tracing and per-request timeout
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, AppState, ServerConfig};
