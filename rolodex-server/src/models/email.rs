//! Email address validation

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for an email address (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

/// Loose shape check: something@something.tld, no whitespace
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Validated email address
///
/// Comparison is exact and case-sensitive, matching the unique
/// constraint on `customers.email`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Parse an email address.
    ///
    /// # Example
    /// ```
    /// use rolodex_server::models::Email;
    ///
    /// assert!(Email::parse("ann@example.com").is_ok());
    /// assert!(Email::parse("not-an-email").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be a valid email address",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}
