//! Bearer token authentication gate
//!
//! Every request whose path falls under the protected prefix must carry
//! `Authorization: Bearer <token>` matching the configured token. Requests
//! outside the prefix pass through untouched.

mod tokens;

pub use tokens::{bearer_header, hash_token, BEARER_PREFIX};

use crate::error::{Result, WellnessError};

/// Route prefix all tool invocations live under
pub const PROTECTED_PREFIX: &str = "/mcp";

/// Static-token gate in front of the tool routes
#[derive(Debug, Clone)]
pub struct BearerGate {
    prefix: String,
    expected_hash: String,
}

impl BearerGate {
    /// Gate the default `/mcp` prefix with the given token
    pub fn new(token: &str) -> Self {
        Self::with_prefix(token, PROTECTED_PREFIX)
    }

    pub fn with_prefix(token: &str, prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            expected_hash: hash_token(&bearer_header(token)),
        }
    }

    /// Whether a request path requires a bearer credential
    pub fn is_protected(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Admit or reject a request given its path and raw `Authorization` value
    pub fn check(&self, path: &str, authorization: Option<&str>) -> Result<()> {
        if !self.is_protected(path) {
            return Ok(());
        }

        match authorization {
            Some(value) if hash_token(value) == self.expected_hash => Ok(()),
            _ => Err(WellnessError::Unauthorized),
        }
    }
}
