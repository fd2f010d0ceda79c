//! Shared helpers for integration tests
//!
//! Database tests run against `DATABASE_URL`:
//! `DATABASE_URL=postgres://... cargo test -p rolodex-server -- --ignored`

#![allow(dead_code)]

use std::time::Duration;

use rolodex_server::{ensure_schema, router, AppState};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool against the test database, with the schema in place.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect failed");
    ensure_schema(&pool).await.expect("schema setup failed");
    pool
}

/// Pool that never connects; requests that reach the database fail fast.
pub fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://rolodex@127.0.0.1:1/rolodex_test")
        .expect("valid url")
}

/// Router without CORS/trace layers, backed by an unreachable database.
pub fn offline_app() -> axum::Router {
    router(AppState::new(unreachable_pool()))
}

/// Short unique token so parallel tests do not see each other's rows.
pub fn token() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}
