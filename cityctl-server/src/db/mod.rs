//! Database layer - connection pool, per-request sessions and query builders
//!
//! # Design Principles
//!
//! - One session per request, handed to the handler explicitly
//! - Sessions release their pooled connection on drop, on every exit path
//! - Optional filters are composed with bound parameters, never spliced text
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod bootstrap;
pub mod filter;
#[cfg(test)]
pub mod memory;
pub mod pg;
pub mod pool;

use async_trait::async_trait;

use crate::models::{
    AddressListing, Agency, AppUser, ComplaintSummary, ComplaintType, DefaultHandler,
    EntityLookup, Neighborhood, ResolutionStats, TrackedComplaint, TypeCount,
};

pub use filter::{ComplaintFilter, Scope};
#[cfg(test)]
pub use memory::{Dataset, MemoryStore};
pub use pg::{PgSession, PgStore};
pub use pool::{create_pool, PoolSettings};
pub use sqlx::PgPool;

/// Maximum rows returned by complaint search
pub const SEARCH_LIMIT: i64 = 50;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database unavailable: {0}")]
    Unavailable(String),
}

/// Source of per-request sessions.
#[async_trait]
pub trait Store: Send + Sync {
    /// Acquire a session for one request. Dropping it releases the connection.
    async fn acquire(&self) -> Result<Box<dyn Session>, DbError>;
}

/// Queries available to a request handler over one acquired connection.
#[async_trait]
pub trait Session: Send {
    /// Names in the demo `test` table.
    async fn demo_names(&mut self) -> Result<Vec<String>, DbError>;

    /// Insert a name into the demo table.
    async fn insert_demo_name(&mut self, name: &str) -> Result<(), DbError>;

    /// Addresses left-joined to neighborhood, by neighborhood then street.
    async fn addresses(&mut self) -> Result<Vec<AddressListing>, DbError>;

    /// Complaint-type to default-agency mapping, by topic.
    async fn default_handlers(&mut self) -> Result<Vec<DefaultHandler>, DbError>;

    async fn neighborhoods(&mut self) -> Result<Vec<Neighborhood>, DbError>;

    async fn agencies(&mut self) -> Result<Vec<Agency>, DbError>;

    async fn complaint_types(&mut self) -> Result<Vec<ComplaintType>, DbError>;

    /// Exact, case-insensitive name match (or id match).
    async fn find_neighborhood(
        &mut self,
        lookup: &EntityLookup,
    ) -> Result<Option<Neighborhood>, DbError>;

    /// Case-insensitive substring match (or id match); lowest id wins.
    async fn find_agency(&mut self, lookup: &EntityLookup) -> Result<Option<Agency>, DbError>;

    /// Mean days from creation to closure, and the number of complaints
    /// averaged, over complaints in scope with both timestamps.
    async fn resolution_stats(&mut self, filter: &ComplaintFilter)
        -> Result<ResolutionStats, DbError>;

    /// Complaints in scope grouped by topic, count descending.
    async fn counts_by_type(&mut self, filter: &ComplaintFilter)
        -> Result<Vec<TypeCount>, DbError>;

    /// All users ordered by name.
    async fn users(&mut self) -> Result<Vec<AppUser>, DbError>;

    async fn user(&mut self, user_id: i32) -> Result<Option<AppUser>, DbError>;

    /// A user's tracked complaints, most recently tracked first.
    async fn tracked_complaints(&mut self, user_id: i32)
        -> Result<Vec<TrackedComplaint>, DbError>;

    /// Substring search over description and topic, newest first.
    async fn search_complaints(
        &mut self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<ComplaintSummary>, DbError>;

    /// Track a complaint if not already tracked. Returns whether a row was added.
    async fn track(
        &mut self,
        user_id: i32,
        complaint_id: i32,
        note: Option<&str>,
    ) -> Result<bool, DbError>;

    /// Stop tracking. Returns whether a row was removed.
    async fn untrack(&mut self, user_id: i32, complaint_id: i32) -> Result<bool, DbError>;
}
