//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use rolodex_server::ensure_schema;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create tables and indexes, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.database.connect().await?;

    ensure_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    tracing::info!("Schema is up to date");
    pool.close().await;
    Ok(())
}
