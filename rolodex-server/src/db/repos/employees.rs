//! Employee repository
//!
//! Same shape as customers with weaker rules: email is optional and
//! only checked for uniqueness when present.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{EmployeePatch, NewEmployee, Paginated, Pagination};

use super::listing::Listing;
use super::DbError;

const RESOURCE: &str = "employee";

const COLUMNS: &str = "id, email, first_name, last_name, avatar, created_at, updated_at";

/// Projection used by the paginated listing (no timestamps)
const SUMMARY_COLUMNS: &str = "id, email, first_name, last_name, avatar";

const INSERT_CHUNK: usize = 1000;

/// Employee record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Employee {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee fields exposed by the paginated listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct EmployeeSummary {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

/// Employee repository
pub struct EmployeeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an employee.
    ///
    /// Email uniqueness is pre-checked only when an email is supplied;
    /// `employees_email_key` remains the authority.
    pub async fn create(&self, employee: NewEmployee) -> Result<Employee, DbError> {
        if let Some(email) = employee.email.as_deref() {
            let taken: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)")
                    .bind(email)
                    .fetch_one(self.pool)
                    .await?;

            if taken.0 {
                return Err(DbError::Conflict {
                    resource: RESOURCE,
                    field: "email",
                });
            }
        }

        let created: Employee = sqlx::query_as(&format!(
            r#"
            INSERT INTO employees (id, email, first_name, last_name, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(employee.id.as_str())
        .bind(employee.email.as_deref())
        .bind(employee.first_name.as_deref())
        .bind(employee.last_name.as_deref())
        .bind(employee.avatar.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(DbError::on_write(RESOURCE))?;

        Ok(created)
    }

    /// Insert many employees atomically.
    pub async fn create_many(&self, employees: &[NewEmployee]) -> Result<Vec<Employee>, DbError> {
        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(employees.len());

        for chunk in employees.chunks(INSERT_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO employees (id, email, first_name, last_name, avatar) ",
            );
            builder.push_values(chunk, |mut row, e| {
                row.push_bind(e.id.as_str())
                    .push_bind(e.email.as_deref())
                    .push_bind(e.first_name.as_deref())
                    .push_bind(e.last_name.as_deref())
                    .push_bind(e.avatar.as_deref());
            });
            builder.push(" RETURNING ").push(COLUMNS);

            let rows: Vec<Employee> = builder
                .build_query_as()
                .fetch_all(&mut *tx)
                .await
                .map_err(DbError::on_write(RESOURCE))?;
            created.extend(rows);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Every employee, newest first.
    pub async fn list_all(&self) -> Result<Vec<Employee>, DbError> {
        let employees = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM employees ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(employees)
    }

    /// One page of employees (summary projection).
    pub async fn list(&self, page: Pagination) -> Result<Paginated<EmployeeSummary>, DbError> {
        Listing {
            table: "employees",
            columns: SUMMARY_COLUMNS,
            search: None,
        }
        .fetch_page(self.pool, page)
        .await
    }

    /// Get a single employee by ID.
    pub async fn get(&self, id: &str) -> Result<Employee, DbError> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM employees WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply a partial update: omitted fields keep their value, `null` clears.
    pub async fn update(&self, id: &str, patch: EmployeePatch) -> Result<Employee, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut employee: Employee = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM employees WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        let previous_email = employee.email.clone();
        patch.email.apply_to(&mut employee.email);
        patch.first_name.apply_to(&mut employee.first_name);
        patch.last_name.apply_to(&mut employee.last_name);
        patch.avatar.apply_to(&mut employee.avatar);

        if let Some(email) = employee.email.as_deref() {
            if previous_email.as_deref() != Some(email) {
                let taken: (bool,) = sqlx::query_as(
                    "SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1 AND id <> $2)",
                )
                .bind(email)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

                if taken.0 {
                    return Err(DbError::Conflict {
                        resource: RESOURCE,
                        field: "email",
                    });
                }
            }
        }

        let updated: Employee = sqlx::query_as(&format!(
            r#"
            UPDATE employees
            SET email = $2, first_name = $3, last_name = $4, avatar = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&employee.email)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.avatar)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::on_write(RESOURCE))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Hard-delete an employee.
    pub async fn delete(&self, id: &str) -> Result<(), DbError> {
        sqlx::query_scalar::<_, String>("DELETE FROM employees WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> DbError {
    DbError::NotFound {
        resource: RESOURCE,
        id: id.to_owned(),
    }
}
