//! Record identifiers

use uuid::Uuid;

use super::ValidationError;
use super::text::MAX_TEXT_LEN;

/// Primary key for customer and employee rows.
///
/// Clients may supply their own identifier; otherwise a random
/// UUID v4 string is generated at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validate a client-supplied identifier.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        if trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "id",
                max: MAX_TEXT_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Use the supplied identifier if present, generate one otherwise.
    pub fn supplied_or_generated(supplied: Option<&str>) -> Result<Self, ValidationError> {
        supplied.map_or_else(|| Ok(Self::generate()), Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuids() {
        let id = RecordId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, RecordId::generate());
    }

    #[test]
    fn supplied_id_is_kept() {
        let id = RecordId::supplied_or_generated(Some("emp-7")).unwrap();
        assert_eq!(id.as_str(), "emp-7");
    }

    #[test]
    fn rejects_blank_supplied_id() {
        assert!(RecordId::supplied_or_generated(Some(" ")).is_err());
    }

    #[test]
    fn length_limit_counts_characters() {
        let accented = "é".repeat(MAX_TEXT_LEN);
        assert!(RecordId::parse(&accented).is_ok());

        let too_long = "é".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            RecordId::parse(&too_long),
            Err(ValidationError::TooLong {
                field: "id",
                max: MAX_TEXT_LEN,
            })
        );
    }
}
