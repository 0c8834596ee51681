//! Schema setup for the waitlist table

use sqlx::PgPool;

/// Create the waitlist table if it does not exist.
///
/// Idempotent; applied when the shared connection first comes up. The
/// UNIQUE constraint on email is the uniqueness enforcement - inserts
/// never check-then-insert.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Applying waitlist schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS waitlist_entries (
            id         UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email      TEXT NOT NULL UNIQUE,
            username   TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
