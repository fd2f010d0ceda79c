//! Command implementations for the rolodex CLI

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use rolodex_server::db::create_pool;
use rolodex_server::DatabaseConfig;
use sqlx::PgPool;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Database connection flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Connection URL (default: DATABASE_URL, or DB_HOST/DB_PORT/DB_NAME/DB_USER/DB_PASSWORD)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pool connections (default: DB_MAX_CONNECTIONS or 5)
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl DatabaseArgs {
    /// Resolve flags over environment variables.
    pub fn resolve(&self) -> Result<DatabaseConfig> {
        let mut config = match &self.database_url {
            Some(url) => DatabaseConfig::from_url(url)?,
            None => DatabaseConfig::from_env().context(
                "Database not configured. Set DATABASE_URL or DB_NAME and DB_USER (in the environment or .env)",
            )?,
        };
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        Ok(config)
    }

    /// Connect, failing when the database is unreachable.
    pub async fn connect(&self) -> Result<PgPool> {
        let config = self.resolve()?;
        tracing::debug!(?config, "connecting to database");

        create_pool(&config)
            .await
            .context("Failed to connect to database")
    }
}
