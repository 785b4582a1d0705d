//! JWT and CORS configuration.

use std::env;

/// Configuration for token signing and the allowed CORS origins.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    pub expiration_minutes: i64,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "departament-demo-signing-key-change-me".to_string(),
            expiration_minutes: 60,
            allowed_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

impl JwtConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = env::var("JWT_SECRET").unwrap_or(defaults.secret);

        let expiration_minutes = env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.expiration_minutes);

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            secret,
            expiration_minutes,
            allowed_origins,
        }
    }
}
