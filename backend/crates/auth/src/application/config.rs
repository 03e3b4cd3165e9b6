//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::crypto::random_key;
use platform::password::{PasswordHashCost, PasswordHashError, PasswordService};

/// Session token lifetime (7 days)
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC signing of session tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost for new hashes
    pub password_cost: PasswordHashCost,
}

/// Random token secret: tokens stop verifying when the process restarts
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: random_key(),
            token_ttl: TOKEN_TTL,
            password_pepper: None,
            password_cost: PasswordHashCost::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a fixed token secret
    pub fn with_secret(token_secret: [u8; 32]) -> Self {
        Self {
            token_secret,
            ..Default::default()
        }
    }

    /// Create config for development and tests (random secret, cheapest hash cost)
    pub fn development() -> Self {
        Self {
            password_cost: PasswordHashCost::minimal(),
            ..Self::default()
        }
    }

    /// Get token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.as_millis() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the password hashing service for this configuration
    pub fn password_service(&self) -> Result<PasswordService, PasswordHashError> {
        PasswordService::new(self.password_cost, self.password_pepper.clone())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.pepper().map(|_| "[REDACTED]"))
            .field("password_cost", &self.password_cost)
            .finish()
    }
}
