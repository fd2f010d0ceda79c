//! Table bootstrap
//!
//! Creates the `customers` and `employees` tables if they are absent.
//! There is no versioned migration history; statements are idempotent.

use sqlx::PgPool;

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL,
        first_name TEXT NOT NULL CHECK (first_name <> ''),
        last_name TEXT NOT NULL CHECK (last_name <> ''),
        phone TEXT,
        address TEXT,
        city TEXT,
        country TEXT,
        postal_code TEXT,
        date_of_birth DATE,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT customers_email_key UNIQUE (email)
    )
"#;

const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id TEXT PRIMARY KEY,
        email TEXT,
        first_name TEXT,
        last_name TEXT,
        avatar TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT employees_email_key UNIQUE (email)
    )
"#;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS customers_created_at_idx ON customers (created_at DESC, id DESC)",
    "CREATE INDEX IF NOT EXISTS employees_created_at_idx ON employees (created_at DESC, id DESC)",
];

/// Advisory lock key held while creating tables.
/// Concurrent `CREATE TABLE IF NOT EXISTS` can still collide on pg_type.
const SCHEMA_LOCK_KEY: i64 = 0x726f_6c6f_6465_78;

/// Create tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query(CREATE_CUSTOMERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_EMPLOYEES).execute(&mut *tx).await?;

    for statement in INDEXES {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");

        ensure_schema(&pool).await.expect("first run failed");
        ensure_schema(&pool).await.expect("second run failed");
    }
}
