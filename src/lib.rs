//! Wellness - health & wellness MCP server
//!
//! Reminders, progress tracking and wellness tips exposed as MCP tools over
//! HTTP, behind a static bearer token, persisted in SQLite.

pub mod auth;
pub mod config;
pub mod error;
pub mod mcp;
pub mod server;
pub mod storage;
pub mod tips;
pub mod types;

pub use error::{Result, WellnessError};
pub use storage::Storage;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
