//! Error types for the wellness server

use thiserror::Error;

/// Result type alias for wellness operations
pub type Result<T> = std::result::Result<T, WellnessError>;

/// Main error type for the wellness server
#[derive(Error, Debug)]
pub enum WellnessError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid token")]
    Unauthorized,

    #[error("puch_user_id required")]
    MissingIdentity,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WellnessError {
    /// Whether the caller is at fault (4xx) rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WellnessError::Unauthorized
                | WellnessError::MissingIdentity
                | WellnessError::InvalidInput(_)
        )
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            WellnessError::InvalidInput(_) => -32602,
            WellnessError::MissingIdentity => -32602,
            WellnessError::Unauthorized => -32003,
            _ => -32000,
        }
    }

    /// HTTP status code this error surfaces as
    pub fn status(&self) -> u16 {
        match self {
            WellnessError::Unauthorized => 401,
            WellnessError::MissingIdentity | WellnessError::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}
