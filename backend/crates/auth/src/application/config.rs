//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

pub use platform::crypto::SigningSecret;

/// Default bearer token lifetime (7 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Longest accepted token lifetime, in days
pub const MAX_TOKEN_TTL_DAYS: u64 = 3650;

/// Longest accepted token lifetime
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(MAX_TOKEN_TTL_DAYS * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing key for bearer tokens
    pub jwt_secret: SigningSecret,
    /// Lifetime of issued bearer tokens
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: SigningSecret) -> Self {
        Self {
            jwt_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Create config with a random signing key
    pub fn with_random_secret() -> Self {
        Self::new(SigningSecret::random())
    }

    /// Create config for development (random key; tokens die with the process)
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Override the token lifetime, capped at [`MAX_TOKEN_TTL`]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl.min(MAX_TOKEN_TTL);
        self
    }

    /// Token lifetime in whole seconds, capped at [`MAX_TOKEN_TTL`]
    pub fn token_ttl_secs(&self) -> i64 {
        let secs = self.token_ttl.min(MAX_TOKEN_TTL).as_secs();
        i64::try_from(secs).unwrap_or(i64::MAX)
    }
}
