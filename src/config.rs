//! Server configuration
//!
//! Both the bearer token and the identity string are required; the server
//! refuses to start without them.

use std::net::SocketAddr;

use crate::error::{Result, WellnessError};
use crate::types::{StorageConfig, StorageMode};

/// Default database file, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "health_data.db";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8086;

/// Validated server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub auth_token: String,
    /// Identity returned by the `validate` tool
    pub identity: String,
    pub storage: StorageConfig,
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Build a config from raw settings, rejecting missing required values
    pub fn new(
        auth_token: Option<String>,
        identity: Option<String>,
        storage: StorageConfig,
        addr: SocketAddr,
    ) -> Result<Self> {
        let auth_token = require("AUTH_TOKEN", auth_token)?;
        let identity = require("MY_NUMBER", identity)?;

        Ok(Self {
            auth_token,
            identity,
            storage,
            addr,
        })
    }

    /// Config for tests: in-memory store, ephemeral port
    pub fn for_test(auth_token: &str, identity: &str) -> Self {
        Self {
            auth_token: auth_token.to_string(),
            identity: identity.to_string(),
            storage: StorageConfig::in_memory(),
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}

fn require(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WellnessError::Config(format!(
            "{name} environment variable not set. Please set it in your .env file or system environment."
        ))),
    }
}

/// Resolve a database path, expanding `~`
pub fn resolve_db_path(raw: &str) -> String {
    shellexpand::tilde(raw).to_string()
}

/// Parse a storage mode flag, falling back to local on unknown values
pub fn parse_storage_mode(raw: &str) -> StorageMode {
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!("{}, using local", e);
        StorageMode::Local
    })
}
