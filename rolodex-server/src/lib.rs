//! rolodex-server: customer and employee records over HTTP
//!
//! Layers, bottom-up:
//! - `models`: request payloads validated into domain values
//! - `db`: pool, schema bootstrap and repositories (PostgreSQL via sqlx)
//! - `http`: axum router, handlers and JSON error responses
//! - `config`: database settings from the environment

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{create_pool, ensure_schema};
pub use http::{router, run_server, AppState, ServerConfig, ServerError};
