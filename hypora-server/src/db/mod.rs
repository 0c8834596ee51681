//! Database layer - connection lifecycle, schema, and the waitlist store
//!
//! # Design Principles
//!
//! - One process-wide pool, connected lazily and shared by all requests
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Connect attempts are bounded by a timeout and never left poisoned

pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::{ConnectError, ConnectionManager, DbConfig};
pub use store::{NewEntry, PgWaitlistStore, StoreError, WaitlistEntry, WaitlistStore};
