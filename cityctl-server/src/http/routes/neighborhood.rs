//! Neighborhood search - resolution speed and complaint mix

use axum::{extract::Query, routing::get, Router};
use maud::Markup;
use serde::Deserialize;

use super::search::{load_form, EntityKind, SearchCriteria};
use crate::db::ComplaintFilter;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::models::{round_days, total_count};
use crate::state::AppState;
use crate::views::search::{neighborhood_page, NeighborhoodReport};

/// Search query string
#[derive(Debug, Default, Deserialize)]
pub struct NeighborhoodQuery {
    pub neighborhood_id: Option<String>,
    pub neighborhood_name: Option<String>,
    pub complaint_type_id: Option<String>,
}

/// GET /neighborhood - empty search form
async fn neighborhood_form(mut conn: DbConn) -> Markup {
    let form = load_form(&mut conn, EntityKind::Neighborhood, None, None, None).await;
    neighborhood_page(&form, None)
}

/// GET /neighborhood/search - statistics for one neighborhood
async fn neighborhood_search(
    mut conn: DbConn,
    Query(params): Query<NeighborhoodQuery>,
) -> Result<Markup, ApiError> {
    let id = params.neighborhood_id.as_deref();
    let name = params.neighborhood_name.as_deref();
    let type_id = params.complaint_type_id.as_deref();

    let mut form = load_form(&mut conn, EntityKind::Neighborhood, id, name, type_id).await;

    let criteria = match SearchCriteria::parse(
        id,
        name,
        type_id,
        "neighborhood_id",
        "Please enter a neighborhood name",
    ) {
        Ok(criteria) => criteria,
        Err(message) => {
            form.error = Some(message);
            return Ok(neighborhood_page(&form, None));
        }
    };

    let session = conn.session()?;
    let Some(neighborhood) = session.find_neighborhood(&criteria.lookup).await? else {
        form.error = Some(format!("Neighborhood '{}' not found", criteria.lookup));
        return Ok(neighborhood_page(&form, None));
    };

    let filter =
        ComplaintFilter::neighborhood(neighborhood.neighborhood_id, criteria.complaint_type_id);
    let avg_speed = round_days(session.resolution_stats(&filter).await?.avg_days);
    let complaint_types = session.counts_by_type(&filter).await?;

    tracing::debug!(
        neighborhood_id = neighborhood.neighborhood_id,
        avg_speed,
        "Neighborhood statistics computed"
    );

    let report = NeighborhoodReport {
        neighborhood_name: neighborhood.name,
        avg_speed,
        total_complaints: total_count(&complaint_types),
        complaint_types,
    };
    Ok(neighborhood_page(&form, Some(&report)))
}

/// Neighborhood routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/neighborhood", get(neighborhood_form))
        .route("/neighborhood/search", get(neighborhood_search))
}
