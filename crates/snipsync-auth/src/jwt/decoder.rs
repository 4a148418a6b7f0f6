//! JWT token decoding and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};

use snipsync_core::config::auth::AuthConfig;
use snipsync_core::error::AppError;

use super::claims::Claims;

/// Decodes and validates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for signature verification.
    decoding_key: DecodingKey,
    /// Validation rules (HS256, exp checked).
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder").finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Decodes an access token, verifying signature and expiry.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Access token expired")
                }
                _ => AppError::unauthorized("Invalid access token"),
            })
    }
}
