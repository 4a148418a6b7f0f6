//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl_hours")]
    pub access_ttl_hours: u64,
    /// Minimum zxcvbn password score (0-4) accepted at signup.
    #[serde(default = "default_min_password_score")]
    pub min_password_score: u8,
}

fn default_access_ttl_hours() -> u64 {
    24
}

fn default_min_password_score() -> u8 {
    3
}
