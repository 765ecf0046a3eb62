//! Wellness MCP Server
//!
//! Run with: wellness-server

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wellness::config::{
    parse_storage_mode, resolve_db_path, ServerConfig, DEFAULT_DB_PATH, DEFAULT_PORT,
};
use wellness::error::Result;
use wellness::server::WellnessServer;
use wellness::storage::Storage;
use wellness::types::StorageConfig;

#[derive(Parser, Debug)]
#[command(name = "wellness-server")]
#[command(about = "Health & wellness MCP server")]
struct Args {
    /// Static bearer token required on /mcp
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    /// Identity returned by the validate tool ({country_code}{number})
    #[arg(long, env = "MY_NUMBER")]
    my_number: Option<String>,

    /// Database path
    #[arg(long, env = "WELLNESS_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db_path: String,

    /// Storage mode (local or cloud-safe)
    #[arg(long, env = "WELLNESS_STORAGE_MODE", default_value = "local")]
    storage_mode: String,

    /// Bind address
    #[arg(long, env = "WELLNESS_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Listen port
    #[arg(long, env = "WELLNESS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let storage_config = StorageConfig {
        db_path: resolve_db_path(&args.db_path),
        storage_mode: parse_storage_mode(&args.storage_mode),
    };

    let config = ServerConfig::new(
        args.auth_token,
        args.my_number,
        storage_config,
        SocketAddr::new(args.host, args.port),
    )?;

    let storage = Storage::open(config.storage.clone())?;
    tracing::info!(
        db_path = %storage.db_path(),
        mode = ?storage.storage_mode(),
        "Storage opened"
    );

    tracing::info!("Wellness MCP server starting on {}...", config.addr);
    WellnessServer::new(&config, storage).start().await?;

    Ok(())
}
