//! Static bearer token handling

use sha2::{Digest, Sha256};

/// Authorization scheme prefix
pub const BEARER_PREFIX: &str = "Bearer ";

/// Hash a credential so the raw token is not held for comparison
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Expected `Authorization` header value for a token
pub fn bearer_header(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}
