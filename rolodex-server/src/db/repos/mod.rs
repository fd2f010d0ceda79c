//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the injected pool
//! - Maps unique-constraint violations to `DbError::Conflict`
//! - Uses transactions for bulk inserts and read-modify-write updates

pub mod customers;
pub mod employees;
pub mod listing;

pub use customers::{Customer, CustomerRepo};
pub use employees::{Employee, EmployeeRepo, EmployeeSummary};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} with this {field} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
    },
}

impl DbError {
    /// Classify a write error, turning unique violations into conflicts.
    pub(crate) fn on_write(resource: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
        move |err| {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.is_unique_violation() {
                    return DbError::Conflict {
                        resource,
                        field: conflicting_field(db_err.constraint()),
                    };
                }
            }
            DbError::Sqlx(err)
        }
    }
}

/// Map a constraint name (`customers_email_key`, `employees_pkey`) to its column.
fn conflicting_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.ends_with("_pkey") => "id",
        Some(name) if name.contains("email") => "email",
        _ => "value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_names_map_to_fields() {
        assert_eq!(conflicting_field(Some("customers_email_key")), "email");
        assert_eq!(conflicting_field(Some("employees_pkey")), "id");
        assert_eq!(conflicting_field(None), "value");
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = DbError::on_write("customer")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn conflict_message() {
        let err = DbError::Conflict {
            resource: "customer",
            field: "email",
        };
        assert_eq!(
            err.to_string(),
            "conflict: customer with this email already exists"
        );
    }
}
