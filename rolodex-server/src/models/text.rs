//! Required text fields (names)

use super::ValidationError;

/// Maximum length for short text columns
pub const MAX_TEXT_LEN: usize = 255;

/// Validated, non-empty text value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    /// Create a required text value for `field`.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_TEXT_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}
