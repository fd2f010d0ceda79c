//! HTTP server command
//!
//! Connects to PostgreSQL, makes sure the schema exists, then serves
//! the customer and employee API until Ctrl+C / SIGTERM.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use rolodex_server::http::{run_server, ServerConfig};
use rolodex_server::ensure_schema;

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST_ADDR", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting rolodex server on {}", config.bind_addr);

    let pool = args.database.connect().await?;

    ensure_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn flags_override_bind_address() {
        let args = Wrapper::parse_from([
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--cors-permissive",
        ])
        .serve;
        let config = args.server_config();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9090");
        assert!(config.cors_permissive);
    }
}
