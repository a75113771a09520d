//! Authentication gate.
//!
//! Runs before parsing and dispatch. Checks the caller's remote address
//! against the configured allow-list, then resolves a candidate credential
//! from three sources in fixed priority order: the `X-Api-Key` header, the
//! `api_key` query parameter, and the `Authorization` header with a
//! `Bearer ` prefix stripped. The first present source wins; the candidate
//! must equal the configured key exactly.

use tracing::warn;

use crate::core::config::AuthConfig;
use crate::domains::protocol::{ApiError, RawRequest};

/// Header carrying the raw API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter carrying the raw API key.
pub const API_KEY_PARAM: &str = "api_key";

/// Bearer prefix stripped from the Authorization header.
const BEARER_PREFIX: &str = "Bearer ";

/// Validate caller identity and network origin.
///
/// Returns `Ok(())` when the request may proceed to dispatch; otherwise a
/// 403 (origin not allowed) or 401 (bad credential) that the entry point
/// renders as the terminal error envelope.
pub fn authenticate(raw: &RawRequest, auth: &AuthConfig) -> Result<(), ApiError> {
    if !auth.allowed_ips.is_empty()
        && !auth.allowed_ips.iter().any(|ip| ip == &raw.remote_addr)
    {
        warn!(remote = %raw.remote_addr, "request from address outside allow-list");
        return Err(ApiError::forbidden(
            "access from this address is not allowed",
        ));
    }

    let candidate = extract_credential(raw).unwrap_or_default();
    if candidate != auth.api_key {
        warn!(remote = %raw.remote_addr, "invalid API key");
        return Err(ApiError::unauthorized("invalid API key"));
    }

    Ok(())
}

/// Resolve the candidate credential, first source wins.
fn extract_credential(raw: &RawRequest) -> Option<String> {
    if let Some(key) = raw
        .headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(key.to_string());
    }

    if let Some(key) = raw.query_params().remove(API_KEY_PARAM) {
        return Some(key);
    }

    raw.headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix(BEARER_PREFIX).unwrap_or(v).to_string())
}
