//! Session Token Service
//!
//! Stateless bearer tokens of the form
//! `base64url(payload).base64url(HMAC-SHA256(secret, base64url(payload)))`
//! where the payload is `<user_id>:<expires_at_ms>`.
//!
//! There is no server-side session record, so a token stays valid until it
//! expires. Signing out is the client discarding its token.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;

const SEGMENT_SEPARATOR: char = '.';
const PAYLOAD_SEPARATOR: char = ':';

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Session token expired")]
    Expired,

    #[error("Invalid session token")]
    Invalid,
}

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    config: Arc<AuthConfig>,
}

impl SessionTokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for `user_id` valid for the configured TTL
    pub fn issue(&self, user_id: &UserId) -> IssuedToken {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: &UserId, now: DateTime<Utc>) -> IssuedToken {
        let expires_at_ms = now.timestamp_millis() + self.config.token_ttl_ms();
        let payload = format!("{user_id}{PAYLOAD_SEPARATOR}{expires_at_ms}");

        let encoded_payload = to_base64url(payload.as_bytes());
        let signature = hmac_sha256(&self.config.token_secret, encoded_payload.as_bytes());
        let token = format!(
            "{encoded_payload}{SEGMENT_SEPARATOR}{}",
            to_base64url(&signature)
        );

        IssuedToken {
            token,
            expires_at: ms_to_datetime(expires_at_ms).unwrap_or(now),
        }
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let (encoded_payload, encoded_signature) = token
            .split_once(SEGMENT_SEPARATOR)
            .ok_or(TokenError::Invalid)?;
        if encoded_signature.contains(SEGMENT_SEPARATOR) {
            return Err(TokenError::Invalid);
        }

        // Signature first: nothing in the payload is trusted before this
        let signature = from_base64url(encoded_signature).map_err(|_| TokenError::Invalid)?;
        if !verify_hmac_sha256(
            &self.config.token_secret,
            encoded_payload.as_bytes(),
            &signature,
        ) {
            return Err(TokenError::Invalid);
        }

        let payload = from_base64url(encoded_payload).map_err(|_| TokenError::Invalid)?;
        let payload = std::str::from_utf8(&payload).map_err(|_| TokenError::Invalid)?;
        let (user_id, expires_at_ms) = payload
            .split_once(PAYLOAD_SEPARATOR)
            .ok_or(TokenError::Invalid)?;

        let user_id: UserId = user_id.parse().map_err(|_| TokenError::Invalid)?;
        let expires_at_ms: i64 = expires_at_ms.parse().map_err(|_| TokenError::Invalid)?;

        if now.timestamp_millis() >= expires_at_ms {
            return Err(TokenError::Expired);
        }

        Ok(user_id)
    }
}

fn ms_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
