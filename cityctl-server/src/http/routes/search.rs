//! Shared plumbing for the neighborhood and agency search pages

use crate::db::DbError;
use crate::http::extractors::DbConn;
use crate::models::{parse_optional_id, EntityLookup};
use crate::views::search::SearchForm;
use crate::views::Choice;

/// Which entity a search page looks up
#[derive(Debug, Clone, Copy)]
pub(crate) enum EntityKind {
    Neighborhood,
    Agency,
}

/// Validated search request
#[derive(Debug)]
pub(crate) struct SearchCriteria {
    pub lookup: EntityLookup,
    pub complaint_type_id: Option<i32>,
}

impl SearchCriteria {
    /// Validate the raw query fields. `Err` carries the message to show on
    /// the form; nothing should be queried in that case.
    pub fn parse(
        id: Option<&str>,
        name: Option<&str>,
        complaint_type_id: Option<&str>,
        id_field: &'static str,
        missing_message: &str,
    ) -> Result<Self, String> {
        let complaint_type_id =
            parse_optional_id(complaint_type_id, "complaint_type_id").map_err(|e| e.to_string())?;
        let lookup = EntityLookup::from_fields(id, name, id_field)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| missing_message.to_owned())?;
        Ok(Self {
            lookup,
            complaint_type_id,
        })
    }
}

/// Log a failed dropdown query and carry on with no options.
pub(crate) fn or_empty<T>(result: Result<Vec<T>, DbError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load {} for dropdown", what);
        Vec::new()
    })
}

/// Build the form with its dropdowns populated and the request echoed back.
pub(crate) async fn load_form(
    conn: &mut DbConn,
    kind: EntityKind,
    id: Option<&str>,
    name: Option<&str>,
    complaint_type_id: Option<&str>,
) -> SearchForm {
    let mut form = SearchForm {
        selected_entity: id.and_then(|v| v.trim().parse().ok()),
        name: name.unwrap_or_default().trim().to_owned(),
        selected_type: complaint_type_id.and_then(|v| v.trim().parse().ok()),
        ..SearchForm::default()
    };

    let session = match conn.session() {
        Ok(session) => session,
        Err(_) => {
            tracing::warn!("No database connection; dropdowns left empty");
            return form;
        }
    };

    form.entities = match kind {
        EntityKind::Neighborhood => or_empty(session.neighborhoods().await, "neighborhoods")
            .into_iter()
            .map(|n| Choice::new(n.neighborhood_id, n.name))
            .collect(),
        EntityKind::Agency => or_empty(session.agencies().await, "agencies")
            .into_iter()
            .map(|a| Choice::new(a.agency_id, a.agency_name))
            .collect(),
    };
    form.complaint_types = or_empty(session.complaint_types().await, "complaint types")
        .into_iter()
        .map(|t| Choice::new(t.complaint_type_id, t.complaint_topic))
        .collect();

    form
}
