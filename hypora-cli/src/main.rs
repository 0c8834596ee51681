//! hypora - waitlist signup service for the Hypora landing page
//!
//! Serves the signup API the landing page posts to. Configuration comes
//! from flags, the environment, or a local .env file.

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hypora_server::{run_server, ConnectionManager, DbConfig, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "hypora",
    author,
    version,
    about = "Waitlist signup service for the Hypora landing page"
)]
struct Cli {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    cors_permissive: bool,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so DATABASE_URL and RUST_LOG from the file are visible
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let cli = Cli::parse();

    // Fail fast on missing configuration, before any listener or I/O
    let db_config = match cli.database_url {
        Some(url) => DbConfig::new(url),
        None => DbConfig::from_env()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?,
    };

    tracing::info!("Starting hypora server on {}", cli.bind);

    let conn = ConnectionManager::new(db_config);
    let config = ServerConfig {
        bind_addr: cli.bind,
        cors_permissive: cli.cors_permissive,
    };

    run_server(conn, config).await.context("Server error")?;

    Ok(())
}
