//! HTTP layer
//!
//! Axum server with:
//! - One database session per request (see [`extractors::DbConn`])
//! - Request tracing
//! - Graceful shutdown
//! - Plain-text error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use extractors::DbConn;
pub use server::{build_router, run_server, ServerConfig, ServerError};
