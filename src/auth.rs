//! JWT token generation and validation.
//!
//! Tokens are HS256-signed and carry the fixed demo identity claims the
//! login service issues, plus a unique `jti` for audit purposes.

use crate::config::JwtConfig;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Demo identity baked into every issued token.
const DEMO_USER_ID: i32 = 1;
const DEMO_USER_EMAIL: &str = "jpertuzegea@hotmail.com";
const DEMO_USER_FULL_NAME: &str = "Jorge David Pertuz Egea";
const DEMO_USER_NETWORK: &str = "JpertuzEgea";

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal name (the demo account's email).
    pub unique_name: String,
    pub user_id: String,
    pub user_email: String,
    pub user_full_name: String,
    pub user_network: String,
    /// Unique token identifier (UUID v4) for revocation / audit.
    pub jti: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Not-before time (UTC Unix timestamp).
    pub nbf: i64,
}

/// Build a signed HS256 token with the configured expiration.
pub fn build_token(config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        unique_name: DEMO_USER_EMAIL.to_string(),
        user_id: DEMO_USER_ID.to_string(),
        user_email: DEMO_USER_EMAIL.to_string(),
        user_full_name: DEMO_USER_FULL_NAME.to_string(),
        user_network: DEMO_USER_NETWORK.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: now + config.expiration_minutes * 60,
        nbf: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Signature and expiration are checked; issuer/audience are not set on
/// issued tokens and therefore not validated.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
