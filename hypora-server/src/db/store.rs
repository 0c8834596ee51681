//! Waitlist store - the single persisted collection
//!
//! One INSERT per signup; the email uniqueness constraint lives in the
//! database, and a violation comes back as a distinguishable error rather
//! than a pre-flight check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::connection::{ConnectError, ConnectionManager};
use crate::models::{EmailAddress, Username};

/// Persisted waitlist record
#[derive(Debug, Clone, FromRow)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate entry, already normalized by the models layer
#[derive(Debug)]
pub struct NewEntry {
    pub email: EmailAddress,
    pub username: Username,
}

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert collided with the unique email constraint
    #[error("email already registered")]
    DuplicateEmail,

    /// Could not reach the database at all
    #[error(transparent)]
    Connection(#[from] ConnectError),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

/// Storage seam for waitlist persistence.
///
/// Implementations must report a unique-email collision as
/// `StoreError::DuplicateEmail` and connect-layer failures as
/// `StoreError::Connection`.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    async fn insert(&self, entry: NewEntry) -> Result<WaitlistEntry, StoreError>;
}

/// Postgres-backed waitlist store over the shared connection.
pub struct PgWaitlistStore {
    conn: ConnectionManager,
}

impl PgWaitlistStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    async fn pool(&self) -> Result<PgPool, StoreError> {
        Ok(self.conn.ensure_connected().await?)
    }
}

#[async_trait]
impl WaitlistStore for PgWaitlistStore {
    async fn insert(&self, entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
        let pool = self.pool().await?;

        sqlx::query_as::<_, WaitlistEntry>(
            r#"
            INSERT INTO waitlist_entries (email, username)
            VALUES ($1, $2)
            RETURNING id, email, username, created_at
            "#,
        )
        .bind(entry.email.as_str())
        .bind(entry.username.as_str())
        .fetch_one(&pool)
        .await
        .map_err(classify_insert_error)
    }
}

/// Map a raw insert failure to the store taxonomy.
///
/// Uses sqlx's error kind for unique violations instead of matching on a
/// backend-specific SQLSTATE string.
fn classify_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(e)
}
