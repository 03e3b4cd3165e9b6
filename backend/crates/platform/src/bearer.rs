//! Bearer Credential Extraction
//!
//! Parses `Authorization: Bearer <token>` headers (RFC 6750).

use axum::http::{HeaderMap, header};

/// Authentication scheme name, compared case-insensitively
const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from request headers
///
/// Returns `None` if the header is missing, not valid ASCII, uses a different
/// scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    parse_bearer(value)
}

/// Parse the value of an `Authorization` header
pub fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
