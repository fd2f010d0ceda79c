//! Tri-state fields for partial updates
//!
//! A JSON body can leave a field out, set it to `null`, or give it a
//! value. Updates treat these differently: omitted fields are left
//! unchanged, `null` clears optional columns, values overwrite.
//!
//! Use with `#[serde(default)]` so that an omitted key becomes
//! [`Patch::Missing`].

use serde::{Deserialize, Deserializer};

use super::ValidationError;

/// A field of a partial-update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent from the request body
    Missing,
    /// Key present with `null`
    Null,
    /// Key present with a value
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}

impl<T> Patch<T> {
    /// Collapse a patch for a NOT NULL column.
    ///
    /// `Missing` means "leave unchanged" (`None`); `Null` is rejected.
    pub fn required(self, field: &'static str) -> Result<Option<T>, ValidationError> {
        match self {
            Self::Missing => Ok(None),
            Self::Null => Err(ValidationError::Empty { field }),
            Self::Value(v) => Ok(Some(v)),
        }
    }

    /// Apply the patch to a nullable column value.
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Self::Missing => {}
            Self::Null => *current = None,
            Self::Value(v) => *current = Some(v),
        }
    }
}
