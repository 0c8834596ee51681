//! Shared database connection lifecycle
//!
//! One pool per process, created on first use and reused for every request
//! afterwards. The slot holding the pool is guarded by an async mutex, so
//! the lifecycle is: slot empty (absent), lock held while connecting, slot
//! filled (ready). Concurrent first callers queue on the lock instead of
//! starting duplicate connect attempts; a failed attempt leaves the slot
//! empty, so the next caller starts fresh rather than replaying a dead one.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::Mutex;

use super::migrations;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default bound on a single connect attempt.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the waitlist store.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Read the connection string from `DATABASE_URL`.
    ///
    /// Absence is a configuration error, surfaced before any I/O happens.
    /// There is deliberately no localhost fallback.
    pub fn from_env() -> Result<Self, ConnectError> {
        let url = std::env::var("DATABASE_URL").map_err(|_| ConnectError::MissingDatabaseUrl)?;
        Ok(Self::new(url))
    }
}

/// Connection-layer error type
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("database connect timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("database connect failed: {source}")]
    Connect {
        #[from]
        source: sqlx::Error,
    },

    #[error("schema setup failed: {source}")]
    Migrate { source: sqlx::Error },
}

/// Process-wide connection manager.
///
/// Cheap to clone; clones share the same underlying slot.
#[derive(Clone)]
pub struct ConnectionManager {
    config: DbConfig,
    pool: Arc<Mutex<Option<PgPool>>>,
}

impl ConnectionManager {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            pool: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the shared pool, connecting on first use.
    ///
    /// A ready pool is returned without touching the network. The first
    /// caller to find the slot empty connects (bounded by the configured
    /// connect timeout) and applies the schema; everyone queued behind it
    /// sees the filled slot once it succeeds.
    pub async fn ensure_connected(&self) -> Result<PgPool, ConnectError> {
        let mut slot = self.pool.lock().await;
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let pool = self.connect().await?;
        *slot = Some(pool.clone());
        Ok(pool)
    }

    async fn connect(&self) -> Result<PgPool, ConnectError> {
        let attempt = PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .connect(&self.config.database_url);

        let pool = match tokio::time::timeout(self.config.connect_timeout, attempt).await {
            Ok(Ok(pool)) => pool,
            Ok(Err(source)) => return Err(ConnectError::Connect { source }),
            Err(_) => {
                return Err(ConnectError::Timeout {
                    seconds: self.config.connect_timeout.as_secs(),
                })
            }
        };

        migrations::run(&pool)
            .await
            .map_err(|source| ConnectError::Migrate { source })?;

        tracing::info!("database connection ready");
        Ok(pool)
    }
}
