//! Composable complaint filters for the statistics queries
//!
//! A filter is a scope (one neighborhood, one agency, or the whole city)
//! plus an optional complaint type. Each aggregate query is assembled from
//! the same fragments, so the city-wide benchmark is its own independently
//! bound query rather than a rewrite of the agency one.

use sqlx::{Postgres, QueryBuilder};

/// Which complaints a statistic covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Neighborhood(i32),
    Agency(i32),
    Citywide,
}

/// Scope plus optional complaint-type narrowing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub scope: Scope,
    pub complaint_type_id: Option<i32>,
}

impl ComplaintFilter {
    pub fn neighborhood(neighborhood_id: i32, complaint_type_id: Option<i32>) -> Self {
        Self {
            scope: Scope::Neighborhood(neighborhood_id),
            complaint_type_id,
        }
    }

    pub fn agency(agency_id: i32, complaint_type_id: Option<i32>) -> Self {
        Self {
            scope: Scope::Agency(agency_id),
            complaint_type_id,
        }
    }

    pub fn citywide(complaint_type_id: Option<i32>) -> Self {
        Self {
            scope: Scope::Citywide,
            complaint_type_id,
        }
    }

    /// Push `FROM complaint c` plus whatever join the scope needs.
    fn push_from(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" FROM complaint c");
        if let Scope::Neighborhood(_) = self.scope {
            builder.push(" JOIN address a ON c.address_id = a.address_id");
        }
    }

    /// Push the `WHERE` clause. Callers append further `AND` terms.
    fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE TRUE");
        match self.scope {
            Scope::Neighborhood(id) => {
                builder.push(" AND a.neighborhood_id = ");
                builder.push_bind(id);
            }
            Scope::Agency(id) => {
                builder.push(" AND c.agency_id = ");
                builder.push_bind(id);
            }
            Scope::Citywide => {}
        }
        if let Some(type_id) = self.complaint_type_id {
            builder.push(" AND c.complaint_type_id = ");
            builder.push_bind(type_id);
        }
    }
}

/// `AVG(closed_at - created_at)` in days, and the row count, over resolved
/// complaints in scope.
pub fn resolution_stats_query(filter: &ComplaintFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT \
         (AVG(EXTRACT(EPOCH FROM (c.closed_at - c.created_at)) / 86400))::float8 AS avg_days, \
         COUNT(*) AS resolved",
    );
    filter.push_from(&mut builder);
    filter.push_where(&mut builder);
    builder.push(" AND c.closed_at IS NOT NULL AND c.created_at IS NOT NULL");
    builder
}

/// Complaint counts grouped by topic, largest first.
pub fn counts_by_type_query(filter: &ComplaintFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ct.complaint_topic AS topic, COUNT(*) AS count");
    filter.push_from(&mut builder);
    builder.push(" JOIN complaint_type ct ON c.complaint_type_id = ct.complaint_type_id");
    filter.push_where(&mut builder);
    builder.push(" GROUP BY ct.complaint_topic ORDER BY count DESC, ct.complaint_topic");
    builder
}
