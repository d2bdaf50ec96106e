//! Domain models - rows read from the store and the search inputs that select them
//!
//! Row types map one-to-one onto the columns each query projects.
//! Input types (search terms, ids) are validated at construction.

pub mod validation;
pub mod search;
pub mod stats;

use chrono::NaiveDateTime;
use sqlx::FromRow;

pub use validation::ValidationError;
pub use search::{like_pattern, parse_optional_id, EntityLookup, SearchTerm};
pub use stats::{performance_text, round_days, total_count, ResolutionStats, TypeCount};

/// Agency record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Agency {
    pub agency_id: i32,
    pub agency_name: String,
}

/// Neighborhood record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Neighborhood {
    pub neighborhood_id: i32,
    pub name: String,
}

/// Complaint type record, used for filter dropdowns
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ComplaintType {
    pub complaint_type_id: i32,
    pub complaint_topic: String,
}

/// Address joined to its (optional) neighborhood
#[derive(Debug, Clone, FromRow)]
pub struct AddressListing {
    pub address_id: i32,
    pub street_line_1: String,
    pub street_line_2: Option<String>,
    pub postal_code: String,
    pub neighborhood_name: Option<String>,
}

/// Default complaint-type to agency assignment
#[derive(Debug, Clone, FromRow)]
pub struct DefaultHandler {
    pub complaint_topic: String,
    pub agency_name: String,
}

/// Application user
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AppUser {
    pub user_id: i32,
    pub name: String,
    pub email_address: String,
    pub created_at: NaiveDateTime,
}

/// A complaint on a user's tracked list, with tracking metadata
#[derive(Debug, Clone, FromRow)]
pub struct TrackedComplaint {
    pub complaint_id: i32,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub closed_at: Option<NaiveDateTime>,
    pub complaint_topic: String,
    pub agency_name: String,
    pub status_name: String,
    pub added_at: NaiveDateTime,
    pub note: Option<String>,
}

/// A complaint search hit
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintSummary {
    pub complaint_id: i32,
    pub description: Option<String>,
    pub complaint_topic: String,
    pub agency_name: String,
    pub status_name: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Complaint status record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Status {
    pub status_id: i32,
    pub name: String,
}

/// Street address; the neighborhood is optional
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Address {
    pub address_id: i32,
    pub street_line_1: String,
    pub street_line_2: Option<String>,
    pub postal_code: String,
    pub neighborhood_id: Option<i32>,
}

/// Complaint record with its foreign keys
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Complaint {
    pub complaint_id: i32,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub closed_at: Option<NaiveDateTime>,
    pub address_id: i32,
    pub complaint_type_id: i32,
    pub agency_id: i32,
    pub status_id: i32,
}

impl Complaint {
    /// Days between creation and closure, when both are known.
    pub fn resolution_days(&self) -> Option<f64> {
        let (created, closed) = (self.created_at?, self.closed_at?);
        Some((closed - created).num_seconds() as f64 / 86_400.0)
    }
}

/// A user's tracking of a complaint
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TrackedBy {
    pub user_id: i32,
    pub complaint_id: i32,
    pub added_at: NaiveDateTime,
    pub note: Option<String>,
}

/// Default complaint-type to agency assignment, by id
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DefaultHandlerLink {
    pub complaint_type_id: i32,
    pub agency_id: i32,
}
