//! PostgreSQL-backed store
//!
//! Each request gets its own pooled connection wrapped in a [`PgSession`].
//! Dropping the session returns the connection to the pool.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

use super::filter::{counts_by_type_query, resolution_stats_query, ComplaintFilter};
use super::{DbError, Session, Store};
use crate::models::{
    like_pattern, AddressListing, Agency, AppUser, ComplaintSummary, ComplaintType,
    DefaultHandler, EntityLookup, Neighborhood, ResolutionStats, TrackedComplaint, TypeCount,
};

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn acquire(&self) -> Result<Box<dyn Session>, DbError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgSession { conn }))
    }
}

/// One request's connection
pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl Session for PgSession {
    async fn demo_names(&mut self) -> Result<Vec<String>, DbError> {
        let names = sqlx::query_scalar("SELECT name FROM test ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(names)
    }

    async fn insert_demo_name(&mut self, name: &str) -> Result<(), DbError> {
        sqlx::query("INSERT INTO test (name) VALUES ($1)")
            .bind(name)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    async fn addresses(&mut self) -> Result<Vec<AddressListing>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                a.address_id,
                a.street_line_1,
                a.street_line_2,
                a.postal_code,
                n.name AS neighborhood_name
            FROM address a
            LEFT JOIN neighborhood n ON a.neighborhood_id = n.neighborhood_id
            ORDER BY n.name NULLS LAST, a.street_line_1
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn default_handlers(&mut self) -> Result<Vec<DefaultHandler>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT ct.complaint_topic, ag.agency_name
            FROM default_handler dh
            JOIN complaint_type ct ON dh.complaint_type_id = ct.complaint_type_id
            JOIN agency ag ON dh.agency_id = ag.agency_id
            ORDER BY ct.complaint_topic
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn neighborhoods(&mut self) -> Result<Vec<Neighborhood>, DbError> {
        let rows = sqlx::query_as("SELECT neighborhood_id, name FROM neighborhood ORDER BY name")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn agencies(&mut self) -> Result<Vec<Agency>, DbError> {
        let rows = sqlx::query_as("SELECT agency_id, agency_name FROM agency ORDER BY agency_name")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn complaint_types(&mut self) -> Result<Vec<ComplaintType>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT complaint_type_id, complaint_topic
            FROM complaint_type
            ORDER BY complaint_topic
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn find_neighborhood(
        &mut self,
        lookup: &EntityLookup,
    ) -> Result<Option<Neighborhood>, DbError> {
        let query = match lookup {
            EntityLookup::Id(id) => sqlx::query_as::<Postgres, Neighborhood>(
                "SELECT neighborhood_id, name FROM neighborhood WHERE neighborhood_id = $1",
            )
            .bind(*id),
            EntityLookup::Name(term) => sqlx::query_as(
                r#"
                SELECT neighborhood_id, name
                FROM neighborhood
                WHERE UPPER(name) = UPPER($1)
                ORDER BY neighborhood_id
                LIMIT 1
                "#,
            )
            .bind(term.display().to_owned()),
        };
        Ok(query.fetch_optional(&mut *self.conn).await?)
    }

    async fn find_agency(&mut self, lookup: &EntityLookup) -> Result<Option<Agency>, DbError> {
        let query = match lookup {
            EntityLookup::Id(id) => sqlx::query_as::<Postgres, Agency>(
                "SELECT agency_id, agency_name FROM agency WHERE agency_id = $1",
            )
            .bind(*id),
            EntityLookup::Name(term) => sqlx::query_as(
                r#"
                SELECT agency_id, agency_name
                FROM agency
                WHERE UPPER(agency_name) LIKE UPPER($1)
                ORDER BY agency_id
                LIMIT 1
                "#,
            )
            .bind(like_pattern(term.display())),
        };
        Ok(query.fetch_optional(&mut *self.conn).await?)
    }

    async fn resolution_stats(
        &mut self,
        filter: &ComplaintFilter,
    ) -> Result<ResolutionStats, DbError> {
        let mut builder = resolution_stats_query(filter);
        let stats = builder.build_query_as().fetch_one(&mut *self.conn).await?;
        Ok(stats)
    }

    async fn counts_by_type(
        &mut self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<TypeCount>, DbError> {
        let mut builder = counts_by_type_query(filter);
        let rows = builder.build_query_as().fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }

    async fn users(&mut self) -> Result<Vec<AppUser>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT user_id, name, email_address, created_at
            FROM app_user
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn user(&mut self, user_id: i32) -> Result<Option<AppUser>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT user_id, name, email_address, created_at
            FROM app_user
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    async fn tracked_complaints(
        &mut self,
        user_id: i32,
    ) -> Result<Vec<TrackedComplaint>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                c.complaint_id,
                c.description,
                c.created_at,
                c.closed_at,
                ct.complaint_topic,
                ag.agency_name,
                s.name AS status_name,
                tb.added_at,
                tb.note
            FROM tracked_by tb
            JOIN complaint c ON tb.complaint_id = c.complaint_id
            JOIN complaint_type ct ON c.complaint_type_id = ct.complaint_type_id
            JOIN agency ag ON c.agency_id = ag.agency_id
            JOIN status s ON c.status_id = s.status_id
            WHERE tb.user_id = $1
            ORDER BY tb.added_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn search_complaints(
        &mut self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<ComplaintSummary>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                c.complaint_id,
                c.description,
                ct.complaint_topic,
                ag.agency_name,
                s.name AS status_name,
                c.created_at
            FROM complaint c
            JOIN complaint_type ct ON c.complaint_type_id = ct.complaint_type_id
            JOIN agency ag ON c.agency_id = ag.agency_id
            JOIN status s ON c.status_id = s.status_id
            WHERE UPPER(c.description) LIKE UPPER($1)
               OR UPPER(ct.complaint_topic) LIKE UPPER($1)
            ORDER BY c.created_at DESC NULLS LAST
            LIMIT $2
            "#,
        )
        .bind(like_pattern(query))
        .bind(limit)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn track(
        &mut self,
        user_id: i32,
        complaint_id: i32,
        note: Option<&str>,
    ) -> Result<bool, DbError> {
        // NOT EXISTS keeps sequential tracks idempotent without the unique
        // index; with it, ON CONFLICT also absorbs concurrent inserts.
        let result = sqlx::query(
            r#"
            INSERT INTO tracked_by (user_id, complaint_id, added_at, note)
            SELECT $1, $2, CURRENT_TIMESTAMP, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM tracked_by WHERE user_id = $1 AND complaint_id = $2
            )
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(complaint_id)
        .bind(note)
        .execute(&mut *self.conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn untrack(&mut self, user_id: i32, complaint_id: i32) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tracked_by
            WHERE user_id = $1 AND complaint_id = $2
            "#,
        )
        .bind(user_id)
        .bind(complaint_id)
        .execute(&mut *self.conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
