//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One injected `PgPool`; repositories borrow it, no global handle
//! - Unique constraints are the source of truth; pre-checks are a fast path
//!   and constraint violations surface as `DbError::Conflict`
//! - Transactions for multi-row and read-modify-write operations
//! - Every query is parameterised

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use schema::ensure_schema;
