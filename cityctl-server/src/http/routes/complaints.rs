//! Free-text complaint search

use axum::{extract::Query, routing::get, Router};
use maud::Markup;
use serde::Deserialize;

use crate::db::SEARCH_LIMIT;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::models::parse_optional_id;
use crate::state::AppState;
use crate::views::users::complaint_search;

#[derive(Debug, Default, Deserialize)]
pub struct ComplaintSearchQuery {
    pub query: Option<String>,
    pub user_id: Option<String>,
}

/// GET /complaint/search
async fn search(
    mut conn: DbConn,
    Query(params): Query<ComplaintSearchQuery>,
) -> Result<Markup, ApiError> {
    let query = params.query.as_deref().unwrap_or_default().trim();
    let user_id = parse_optional_id(params.user_id.as_deref(), "user_id")?;

    if query.is_empty() {
        return Ok(complaint_search(query, &[], user_id));
    }

    let complaints = conn
        .session()?
        .search_complaints(query, SEARCH_LIMIT)
        .await?;
    tracing::debug!(query, results = complaints.len(), "Complaint search");

    Ok(complaint_search(query, &complaints, user_id))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/complaint/search", get(search))
}
