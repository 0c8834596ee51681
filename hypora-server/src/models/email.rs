//! Email normalization
//!
//! Registration re-validates presence only; shape validation (regex and
//! friends) is the submitting client's concern. What matters here is the
//! canonical form, because the storage-level uniqueness constraint applies
//! to the normalized value.

use super::ValidationError;

/// Normalized email address: surrounding whitespace trimmed, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize a raw email, rejecting empty or whitespace-only input.
    ///
    /// # Example
    /// ```
    /// use hypora_server::models::EmailAddress;
    ///
    /// let email = EmailAddress::new(" A@Example.com ").unwrap();
    /// assert_eq!(email.as_str(), "a@example.com");
    /// assert!(EmailAddress::new("   ").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Get the normalized email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
