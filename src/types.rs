//! Core types for the wellness server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque per-end-user identifier supplied by the calling client
pub type UserId = String;

/// A recurring health reminder, one per (user, reminder type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub user_id: UserId,
    /// Category label, e.g. "hydration"
    pub reminder_type: String,
    /// Free-form schedule description, e.g. "every 2 hours"
    pub reminder_time: String,
    /// Timestamp of the last write
    pub created_at: DateTime<Utc>,
}

/// A tracked numeric measurement. Rows accumulate; nothing is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub user_id: UserId,
    pub category: String,
    pub value: i64,
    pub last_updated: DateTime<Utc>,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to SQLite database
    pub db_path: String,
    /// Storage mode (local or cloud-safe)
    #[serde(default)]
    pub storage_mode: StorageMode,
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self {
            db_path: ":memory:".to_string(),
            storage_mode: StorageMode::Local,
        }
    }
}

/// Storage mode for SQLite journal handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageMode {
    #[default]
    Local,
    CloudSafe,
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "wal" => Ok(StorageMode::Local),
            "cloud-safe" | "cloud_safe" | "delete" => Ok(StorageMode::CloudSafe),
            _ => Err(format!("Unknown storage mode: {}", s)),
        }
    }
}
