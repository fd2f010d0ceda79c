//! Employee request payloads
//!
//! Employees carry no required fields; only the email uniqueness
//! constraint applies, and only when an email is given.

use serde::Deserialize;

use super::{Patch, RecordId, ValidationError};

/// Body of `POST /employee` (and each element of `POST /employee/array`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

/// An employee ready to be inserted
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub id: RecordId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

impl EmployeeInput {
    pub fn validate(self) -> Result<NewEmployee, ValidationError> {
        Ok(NewEmployee {
            id: RecordId::supplied_or_generated(self.id.as_deref())?,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            avatar: self.avatar,
        })
    }
}

pub fn validate_batch(inputs: Vec<EmployeeInput>) -> Result<Vec<NewEmployee>, ValidationError> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| input.validate().map_err(|e| e.at_index(index)))
        .collect()
}

/// Body of `PUT /employee/{id}`
///
/// Same contract as customers: omitted keys are unchanged, `null` clears.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub avatar: Patch<String>,
}
