//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` has
//! been loaded).

use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::crypto::from_base64;
use platform::password::PasswordHashCost;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";

#[derive(Debug)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory stores
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<String>,
    /// The token secret was generated for this process only
    pub ephemeral_token_secret: bool,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:5000")?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let token_secret = match var("AUTH_TOKEN_SECRET") {
            Some(encoded) => Some(decode_secret(&encoded)?),
            None if cfg!(debug_assertions) => None,
            None => bail!("AUTH_TOKEN_SECRET must be set in release builds"),
        };

        let defaults = PasswordHashCost::default();
        let password_cost = PasswordHashCost {
            memory_kib: parse_or(&var, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&var, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&var, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        let ephemeral_token_secret = token_secret.is_none();
        let base = match token_secret {
            Some(secret) => AuthConfig::with_secret(secret),
            None => AuthConfig::default(),
        };

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            database_max_connections,
            frontend_origins,
            ephemeral_token_secret,
            auth: AuthConfig {
                password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
                password_cost,
                ..base
            },
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(encoded.trim()).context("AUTH_TOKEN_SECRET must be base64")?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        anyhow::anyhow!(
            "AUTH_TOKEN_SECRET must decode to 32 bytes (got {})",
            bytes.len()
        )
    })
}

fn parse_or<F>(var: &F, key: &str, default: u32) -> anyhow::Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(v) => v
            .parse()
            .with_context(|| format!("{key} must be a positive integer")),
        None => Ok(default),
    }
}
