//! Waitlist registration
//!
//! Validates and persists one signup, classifying every failure into a
//! small caller-facing taxonomy. The whole connect + insert sequence races
//! an operation budget: the caller never waits past it, but the underlying
//! write is not aborted, so a late insert may still land (it stays bounded
//! by the unique constraint either way). Propagating the deadline into the
//! storage call itself would close that gap.

use std::time::Duration;

use crate::db::{NewEntry, StoreError, WaitlistEntry, WaitlistStore};
use crate::models::{EmailAddress, Username, ValidationError};

/// Default budget for one registration, connect included.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(8);

/// Caller-facing registration error
#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    /// Missing or empty field, caught before storage is touched
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another entry already holds this normalized email
    #[error("this email is already on the waitlist")]
    DuplicateEmail,

    /// Neither connect nor insert finished inside the budget
    #[error("waitlist registration timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The database could not be reached (reported before the budget fired)
    #[error("database unavailable: {message}")]
    Connection { message: String },

    /// Anything else, original diagnostic preserved
    #[error("{message}")]
    Unknown { message: String },
}

/// Waitlist registration service over a storage seam.
pub struct WaitlistService<S> {
    store: S,
    operation_timeout: Duration,
}

impl<S: WaitlistStore> WaitlistService<S> {
    pub fn new(store: S) -> Self {
        Self::with_timeout(store, DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn with_timeout(store: S, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    /// Register one signup.
    ///
    /// Email is normalized (trim + lowercase) and username trimmed before
    /// the insert; `created_at` defaults at the storage layer. On success
    /// exactly one new entry exists, unique by email.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
    ) -> Result<WaitlistEntry, WaitlistError> {
        let entry = NewEntry {
            email: EmailAddress::new(email)?,
            username: Username::new(username)?,
        };

        match tokio::time::timeout(self.operation_timeout, self.store.insert(entry)).await {
            Ok(Ok(saved)) => {
                tracing::info!(email = %saved.email, "waitlist entry created");
                Ok(saved)
            }
            Ok(Err(e)) => Err(classify_store_error(e)),
            Err(_) => Err(WaitlistError::Timeout {
                seconds: self.operation_timeout.as_secs(),
            }),
        }
    }
}

fn classify_store_error(e: StoreError) -> WaitlistError {
    match e {
        StoreError::DuplicateEmail => WaitlistError::DuplicateEmail,
        StoreError::Connection(source) => {
            tracing::error!(error = %source, "database connection failed");
            WaitlistError::Connection {
                message: source.to_string(),
            }
        }
        StoreError::Database(source) => {
            tracing::error!(error = %source, "waitlist insert failed");
            WaitlistError::Unknown {
                message: source.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ConnectError;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    fn saved_from(entry: NewEntry) -> WaitlistEntry {
        WaitlistEntry {
            id: Uuid::new_v4(),
            email: entry.email.into_string(),
            username: entry.username.into_string(),
            created_at: Utc::now(),
        }
    }

    struct OkStore;

    #[async_trait]
    impl WaitlistStore for OkStore {
        async fn insert(&self, entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
            Ok(saved_from(entry))
        }
    }

    struct DuplicateStore;

    #[async_trait]
    impl WaitlistStore for DuplicateStore {
        async fn insert(&self, _entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
            Err(StoreError::DuplicateEmail)
        }
    }

    struct UnreachableStore;

    #[async_trait]
    impl WaitlistStore for UnreachableStore {
        async fn insert(&self, _entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
            Err(StoreError::Connection(ConnectError::Timeout { seconds: 5 }))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl WaitlistStore for BrokenStore {
        async fn insert(&self, _entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }

    struct SlowStore(Duration);

    #[async_trait]
    impl WaitlistStore for SlowStore {
        async fn insert(&self, entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
            tokio::time::sleep(self.0).await;
            Ok(saved_from(entry))
        }
    }

    /// Panics if the service ever reaches storage.
    struct UntouchedStore;

    #[async_trait]
    impl WaitlistStore for UntouchedStore {
        async fn insert(&self, _entry: NewEntry) -> Result<WaitlistEntry, StoreError> {
            panic!("store must not be called");
        }
    }

    #[tokio::test]
    async fn register_normalizes_fields() {
        let service = WaitlistService::new(OkStore);
        let saved = service
            .register(" A@Example.com ", "  @alice ")
            .await
            .expect("register failed");

        assert_eq!(saved.email, "a@example.com");
        assert_eq!(saved.username, "@alice");
    }

    #[tokio::test]
    async fn empty_email_never_reaches_store() {
        let service = WaitlistService::new(UntouchedStore);
        let err = service.register("   ", "@alice").await.unwrap_err();
        assert!(matches!(err, WaitlistError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_username_never_reaches_store() {
        let service = WaitlistService::new(UntouchedStore);
        let err = service.register("user@test.com", "").await.unwrap_err();
        assert!(matches!(err, WaitlistError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_is_classified() {
        let service = WaitlistService::new(DuplicateStore);
        let err = service.register("user@test.com", "@alice").await.unwrap_err();
        assert!(matches!(err, WaitlistError::DuplicateEmail));
    }

    #[tokio::test]
    async fn connect_failure_is_classified() {
        let service = WaitlistService::new(UnreachableStore);
        let err = service.register("user@test.com", "@alice").await.unwrap_err();
        assert!(matches!(err, WaitlistError::Connection { .. }));
    }

    #[tokio::test]
    async fn other_database_failure_is_unknown() {
        let service = WaitlistService::new(BrokenStore);
        let err = service.register("user@test.com", "@alice").await.unwrap_err();
        match err {
            WaitlistError::Unknown { message } => assert!(!message.is_empty()),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_hits_operation_timeout() {
        let service = WaitlistService::with_timeout(
            SlowStore(Duration::from_secs(30)),
            Duration::from_secs(8),
        );
        let err = service.register("user@test.com", "@alice").await.unwrap_err();
        assert!(matches!(err, WaitlistError::Timeout { seconds: 8 }));
    }

    #[tokio::test(start_paused = true)]
    async fn store_faster_than_budget_succeeds() {
        let service = WaitlistService::with_timeout(
            SlowStore(Duration::from_secs(2)),
            Duration::from_secs(8),
        );
        assert!(service.register("user@test.com", "@alice").await.is_ok());
    }
}
