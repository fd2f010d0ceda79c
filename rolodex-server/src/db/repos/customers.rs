//! Customer repository
//!
//! - create: EXISTS pre-check, INSERT; the unique constraint settles races
//! - create_many: multi-row INSERT inside one transaction (all or nothing)
//! - update: row locked with FOR UPDATE while changes are merged
//! - delete: single DELETE ... RETURNING

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{CustomerChanges, NewCustomer, Paginated, Pagination};

use super::listing::{Listing, Search};
use super::DbError;

const RESOURCE: &str = "customer";

const COLUMNS: &str = "id, email, first_name, last_name, phone, address, city, country, \
                       postal_code, date_of_birth, is_active, created_at, updated_at";

const SEARCH_COLUMNS: &[&str] = &["first_name", "last_name", "email"];

/// Rows per INSERT statement; 11 binds each stays well under the
/// 65535 parameter limit.
const INSERT_CHUNK: usize = 1000;

/// Customer record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    fn apply(&mut self, changes: CustomerChanges) {
        if let Some(email) = changes.email {
            self.email = email.into_string();
        }
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name.into_string();
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name.into_string();
        }
        changes.phone.apply_to(&mut self.phone);
        changes.address.apply_to(&mut self.address);
        changes.city.apply_to(&mut self.city);
        changes.country.apply_to(&mut self.country);
        changes.postal_code.apply_to(&mut self.postal_code);
        changes.date_of_birth.apply_to(&mut self.date_of_birth);
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}

/// Customer repository
pub struct CustomerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether any customer already uses `email`.
    async fn email_taken(&self, email: &str) -> Result<bool, DbError> {
        let taken: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)")
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        Ok(taken.0)
    }

    /// Insert a customer.
    ///
    /// The EXISTS check rejects the common duplicate early; a concurrent
    /// insert of the same email still fails on `customers_email_key` and
    /// is reported as the same conflict.
    pub async fn create(&self, customer: NewCustomer) -> Result<Customer, DbError> {
        if self.email_taken(customer.email.as_str()).await? {
            return Err(DbError::Conflict {
                resource: RESOURCE,
                field: "email",
            });
        }

        let created: Customer = sqlx::query_as(&format!(
            r#"
            INSERT INTO customers
                (id, email, first_name, last_name, phone, address, city, country,
                 postal_code, date_of_birth, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(customer.id.as_str())
        .bind(customer.email.as_str())
        .bind(customer.first_name.as_str())
        .bind(customer.last_name.as_str())
        .bind(customer.phone.as_deref())
        .bind(customer.address.as_deref())
        .bind(customer.city.as_deref())
        .bind(customer.country.as_deref())
        .bind(customer.postal_code.as_deref())
        .bind(customer.date_of_birth)
        .bind(customer.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::on_write(RESOURCE))?;

        Ok(created)
    }

    /// Insert many customers atomically.
    ///
    /// Any failing row (including duplicates inside the batch) rolls the
    /// whole batch back.
    pub async fn create_many(&self, customers: &[NewCustomer]) -> Result<Vec<Customer>, DbError> {
        if customers.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(customers.len());

        for chunk in customers.chunks(INSERT_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO customers (id, email, first_name, last_name, phone, address, \
                 city, country, postal_code, date_of_birth, is_active) ",
            );
            builder.push_values(chunk, |mut row, c| {
                row.push_bind(c.id.as_str())
                    .push_bind(c.email.as_str())
                    .push_bind(c.first_name.as_str())
                    .push_bind(c.last_name.as_str())
                    .push_bind(c.phone.as_deref())
                    .push_bind(c.address.as_deref())
                    .push_bind(c.city.as_deref())
                    .push_bind(c.country.as_deref())
                    .push_bind(c.postal_code.as_deref())
                    .push_bind(c.date_of_birth)
                    .push_bind(c.is_active);
            });
            builder.push(" RETURNING ").push(COLUMNS);

            let rows: Vec<Customer> = builder
                .build_query_as()
                .fetch_all(&mut *tx)
                .await
                .map_err(DbError::on_write(RESOURCE))?;
            created.extend(rows);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Every customer, newest first.
    pub async fn list_all(&self) -> Result<Vec<Customer>, DbError> {
        let customers = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(customers)
    }

    /// One page of customers, optionally filtered by a substring of
    /// first name, last name or email.
    pub async fn list(
        &self,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Paginated<Customer>, DbError> {
        Listing {
            table: "customers",
            columns: COLUMNS,
            search: search.map(|term| Search {
                columns: SEARCH_COLUMNS,
                term,
            }),
        }
        .fetch_page(self.pool, page)
        .await
    }

    /// Get a single customer by ID.
    pub async fn get(&self, id: &str) -> Result<Customer, DbError> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM customers WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply a partial update.
    ///
    /// A changed email is checked against other customers before writing.
    pub async fn update(&self, id: &str, changes: CustomerChanges) -> Result<Customer, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut customer: Customer = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        if let Some(email) = &changes.email {
            if email.as_str() != customer.email {
                let taken: (bool,) = sqlx::query_as(
                    "SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1 AND id <> $2)",
                )
                .bind(email.as_str())
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

        customer.apply(changes);

        let updated: Customer = sqlx::query_as(&format!(
            r#"
            UPDATE customers
            SET email = $2, first_name = $3, last_name = $4, phone = $5, address = $6,
                city = $7, country = $8, postal_code = $9, date_of_birth = $10,
                is_active = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&customer.email)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.country)
        .bind(&customer.postal_code)
        .bind(customer.date_of_birth)
        .bind(customer.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::on_write(RESOURCE))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Hard-delete a customer.
    pub async fn delete(&self, id: &str) -> Result<(), DbError> {
        sqlx::query_scalar::<_, String>("DELETE FROM customers WHERE id = $1 RETURNING id")
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
