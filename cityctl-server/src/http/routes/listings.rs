//! Read-only listings

use axum::{routing::get, Router};
use maud::Markup;

use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::state::AppState;
use crate::views::listings;

/// GET /address
async fn addresses(mut conn: DbConn) -> Result<Markup, ApiError> {
    let rows = conn.session()?.addresses().await?;
    Ok(listings::addresses(&rows))
}

/// GET /default-handlers
async fn default_handlers(mut conn: DbConn) -> Result<Markup, ApiError> {
    let rows = conn.session()?.default_handlers().await?;
    Ok(listings::default_handlers(&rows))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/address", get(addresses))
        .route("/default-handlers", get(default_handlers))
}
