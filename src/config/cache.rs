//! List cache configuration.

use std::env;
use std::time::Duration;

/// Configuration for the in-memory list cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entry lifetime in hours.
    pub expiration_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiration_hours: 1,
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let expiration_hours = env::var("CACHE_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        Self { expiration_hours }
    }

    /// Entry lifetime as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.expiration_hours * 3600)
    }
}
