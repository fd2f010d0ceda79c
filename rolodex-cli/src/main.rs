//! rolodex CLI - runs the customer and employee records API
//!
//! Subcommands:
//! - `serve`: connect to PostgreSQL, ensure the schema, serve HTTP
//! - `migrate`: create tables and indexes, then exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "rolodex",
    author,
    version,
    about = "Customer and employee records API over PostgreSQL",
    long_about = "Serve a JSON API for creating, listing, searching, updating and deleting \
                  customer and employee records. Settings come from flags, the environment \
                  or a .env file in the working directory."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }
    Ok(())
}
