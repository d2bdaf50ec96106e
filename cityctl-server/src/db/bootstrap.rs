//! Startup bootstrap - demo table and tracking uniqueness
//!
//! Idempotent. The domain tables are owned elsewhere; this only creates the
//! demo `test` table and the unique index that makes tracking atomic.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::DbError;

/// Names seeded into an empty demo table
pub const DEMO_NAMES: [&str; 3] = ["grace hopper", "alan turing", "ada lovelace"];

/// What a bootstrap run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub seeded_demo_names: bool,
}

/// Run all bootstrap steps
pub async fn run(pool: &PgPool) -> Result<BootstrapReport, DbError> {
    tracing::info!("Running bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS test (
            id SERIAL,
            name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM test")
        .fetch_one(pool)
        .await?;

    let seeded_demo_names = existing == 0;
    if seeded_demo_names {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("INSERT INTO test (name) ");
        builder.push_values(DEMO_NAMES, |mut row, name| {
            row.push_bind(name);
        });
        builder.build().execute(pool).await?;
        tracing::debug!(count = DEMO_NAMES.len(), "Seeded demo names");
    }

    // Fails if duplicate tracking rows already exist; the caller decides
    // whether that is fatal.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS tracked_by_user_complaint_key
        ON tracked_by (user_id, complaint_id)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Bootstrap complete");
    Ok(BootstrapReport { seeded_demo_names })
}
