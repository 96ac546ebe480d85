//! Credential extraction from the `Authorization` header.

use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::app_error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    extract_with_scheme(
        headers,
        BEARER_PREFIX,
        AuthError::NoAuthHeader,
        AuthError::MalformedAuthHeader,
    )
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    extract_with_scheme(
        headers,
        API_KEY_PREFIX,
        AuthError::NoApiKey,
        AuthError::MalformedApiKeyHeader,
    )
}

/// Check a presented API key against the configured one.
pub fn authorize_api_key(provided: &str, expected: &str) -> Result<(), AuthError> {
    if constant_time_compare(provided, expected) {
        Ok(())
    } else {
        Err(AuthError::InvalidApiKey)
    }
}

// Only the length can leak, never the position of the first differing byte.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

fn extract_with_scheme<'a>(
    headers: &'a HeaderMap,
    prefix: &str,
    missing: AuthError,
    malformed: AuthError,
) -> Result<&'a str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(missing)?;
    let value = value.to_str().map_err(|_| malformed)?;
    let credential = value.strip_prefix(prefix).ok_or(malformed)?.trim();
    if credential.is_empty() {
        return Err(malformed);
    }
    Ok(credential)
}
