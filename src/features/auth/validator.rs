use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;

use super::model::{AuthenticatedUser, Role};
use crate::core::error::AppError;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    /// User id, stringified
    sub: String,
    role: String,
    #[serde(rename = "iat", default)]
    _iat: Option<u64>,
    #[serde(rename = "exp")]
    _exp: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    /// Resolve a bearer token into `{user_id, role}`.
    ///
    /// Rejects expired tokens (with leeway), non-HS256 tokens, malformed
    /// subjects and unknown role claims.
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let claims = token_data.claims;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("Invalid subject claim".to_string()))?;

        let role = Role::parse(&claims.role)
            .ok_or_else(|| AppError::Unauthorized("Unknown role claim".to_string()))?;

        Ok(AuthenticatedUser { user_id, role })
    }
}
