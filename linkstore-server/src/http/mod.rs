//! HTTP server layer
//!
//! Axum server with:
//! - Method-multiplexed link endpoint
//! - Request tracing and timeout
//! - Graceful shutdown
//! - Plain-text error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{
    build_router, run_server, AppState, LinkHandlerConfig, ServerConfig, ServerError,
};
