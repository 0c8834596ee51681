//! Domain models and validation for waitlist signups

pub mod email;
pub mod username;
pub mod validation;

pub use email::EmailAddress;
pub use username::Username;
pub use validation::ValidationError;
