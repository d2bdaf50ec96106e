//! cityctl-server: complaint search and tracking over HTTP
//!
//! Server-rendered pages for exploring city service complaints by
//! neighborhood, agency and type, plus per-user complaint tracking.
//!
//! - [`db`]: pool, per-request sessions, query builders, schema bootstrap
//! - [`http`]: router, handlers, extractors, error mapping
//! - [`views`]: maud templates
//! - [`models`]: row types and input validation

pub mod db;
pub mod http;
pub mod models;
pub mod state;
pub mod views;

pub use db::{create_pool, DbError, PgStore, PoolSettings, Store};
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;
