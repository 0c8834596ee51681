//! hypora-server: waitlist signup backend for the Hypora landing page
//!
//! Captures signups (email + username) into Postgres behind a small HTTP
//! surface. The database connection is process-wide, established lazily on
//! first use, and shared by all requests.

pub mod db;
pub mod http;
pub mod models;
pub mod waitlist;

pub use db::{ConnectError, ConnectionManager, DbConfig};
pub use http::{run_server, ServerConfig};
pub use waitlist::{WaitlistError, WaitlistService};
