//! Agency search - resolution speed against the city-wide benchmark

use axum::{extract::Query, routing::get, Router};
use maud::Markup;
use serde::Deserialize;

use super::search::{load_form, EntityKind, SearchCriteria};
use crate::db::ComplaintFilter;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::models::{performance_text, round_days, total_count};
use crate::state::AppState;
use crate::views::search::{agency_page, AgencyReport};

/// Search query string
#[derive(Debug, Default, Deserialize)]
pub struct AgencyQuery {
    pub agency_id: Option<String>,
    pub agency_name: Option<String>,
    pub complaint_type_id: Option<String>,
}

/// GET /agency - empty search form
async fn agency_form(mut conn: DbConn) -> Markup {
    let form = load_form(&mut conn, EntityKind::Agency, None, None, None).await;
    agency_page(&form, None)
}

/// GET /agency/search - one agency's speed compared with the whole city
async fn agency_search(
    mut conn: DbConn,
    Query(params): Query<AgencyQuery>,
) -> Result<Markup, ApiError> {
    let id = params.agency_id.as_deref();
    let name = params.agency_name.as_deref();
    let type_id = params.complaint_type_id.as_deref();

    let mut form = load_form(&mut conn, EntityKind::Agency, id, name, type_id).await;

    let criteria = match SearchCriteria::parse(
        id,
        name,
        type_id,
        "agency_id",
        "Please enter an agency name",
    ) {
        Ok(criteria) => criteria,
        Err(message) => {
            form.error = Some(message);
            return Ok(agency_page(&form, None));
        }
    };

    let session = conn.session()?;
    let Some(agency) = session.find_agency(&criteria.lookup).await? else {
        form.error = Some(format!("Agency matching '{}' not found", criteria.lookup));
        return Ok(agency_page(&form, None));
    };

    let agency_filter = ComplaintFilter::agency(agency.agency_id, criteria.complaint_type_id);
    let citywide_filter = ComplaintFilter::citywide(criteria.complaint_type_id);

    let agency_stats = session.resolution_stats(&agency_filter).await?;
    let citywide_stats = session.resolution_stats(&citywide_filter).await?;
    let complaint_types = session.counts_by_type(&agency_filter).await?;

    let agency_avg_speed = round_days(agency_stats.avg_days);
    let citywide_avg_speed = round_days(citywide_stats.avg_days);

    let report = AgencyReport {
        agency_name: agency.agency_name,
        agency_avg_speed,
        citywide_avg_speed,
        performance_text: performance_text(agency_avg_speed, citywide_avg_speed),
        resolved_complaints: agency_stats.resolved,
        total_complaints: total_count(&complaint_types),
        complaint_types,
    };

    tracing::debug!(
        agency_id = agency.agency_id,
        agency_avg_speed,
        citywide_avg_speed,
        "Agency benchmark computed"
    );

    Ok(agency_page(&form, Some(&report)))
}

/// Agency routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/agency", get(agency_form))
        .route("/agency/search", get(agency_search))
}
