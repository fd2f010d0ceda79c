//! Customer request payloads and their validated forms

use chrono::NaiveDate;
use serde::Deserialize;

use super::{Email, Patch, RecordId, RequiredText, ValidationError};

/// Body of `POST /customer` (and each element of `POST /customer/array`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerInput {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// A customer ready to be inserted
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub id: RecordId,
    pub email: Email,
    pub first_name: RequiredText,
    pub last_name: RequiredText,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
}

impl CustomerInput {
    /// Check required fields and build the row to insert.
    ///
    /// `is_active` defaults to true when omitted.
    pub fn validate(self) -> Result<NewCustomer, ValidationError> {
        let email = Email::parse(present(self.email.as_deref(), "email")?)?;
        let first_name =
            RequiredText::new("first_name", present(self.first_name.as_deref(), "first_name")?)?;
        let last_name =
            RequiredText::new("last_name", present(self.last_name.as_deref(), "last_name")?)?;

        Ok(NewCustomer {
            id: RecordId::supplied_or_generated(self.id.as_deref())?,
            email,
            first_name,
            last_name,
            phone: self.phone,
            address: self.address,
            city: self.city,
            country: self.country,
            postal_code: self.postal_code,
            date_of_birth: self.date_of_birth,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Validate every element of a bulk request, failing on the first bad one.
pub fn validate_batch(inputs: Vec<CustomerInput>) -> Result<Vec<NewCustomer>, ValidationError> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| input.validate().map_err(|e| e.at_index(index)))
        .collect()
}

fn present<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

/// Body of `PUT /customer/{id}`
///
/// Omitted keys leave the column unchanged; `null` clears optional columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub city: Patch<String>,
    #[serde(default)]
    pub country: Patch<String>,
    #[serde(default)]
    pub postal_code: Patch<String>,
    #[serde(default)]
    pub date_of_birth: Patch<NaiveDate>,
    #[serde(default)]
    pub is_active: Patch<bool>,
}

/// Validated customer update
#[derive(Debug, Clone)]
pub struct CustomerChanges {
    pub email: Option<Email>,
    pub first_name: Option<RequiredText>,
    pub last_name: Option<RequiredText>,
    pub phone: Patch<String>,
    pub address: Patch<String>,
    pub city: Patch<String>,
    pub country: Patch<String>,
    pub postal_code: Patch<String>,
    pub date_of_birth: Patch<NaiveDate>,
    pub is_active: Option<bool>,
}

impl CustomerPatch {
    /// Validate the supplied fields.
    ///
    /// Required columns reject `null` and blank text instead of silently
    /// keeping the previous value.
    pub fn validate(self) -> Result<CustomerChanges, ValidationError> {
        let email = self
            .email
            .required("email")?
            .map(|s| Email::parse(&s))
            .transpose()?;
        let first_name = self
            .first_name
            .required("first_name")?
            .map(|s| RequiredText::new("first_name", &s))
            .transpose()?;
        let last_name = self
            .last_name
            .required("last_name")?
            .map(|s| RequiredText::new("last_name", &s))
            .transpose()?;

        Ok(CustomerChanges {
            email,
            first_name,
            last_name,
            phone: self.phone,
            address: self.address,
            city: self.city,
            country: self.country,
            postal_code: self.postal_code,
            date_of_birth: self.date_of_birth,
            is_active: self.is_active.required("is_active")?,
        })
    }
}
