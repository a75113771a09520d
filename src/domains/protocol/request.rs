//! Request parsing.
//!
//! The transport hands over a [`RawRequest`] (method, query string, headers,
//! remote address, body bytes). Parsing turns it into an [`IncomingRequest`]
//! with the resource name and id split out of the query parameters and the
//! body decoded as JSON, rejecting malformed input before any manager runs.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde_json::Value;

use super::error::ApiError;

/// Transport-level view of a request, before protocol parsing.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub remote_addr: String,
    pub body: Bytes,
}

impl RawRequest {
    /// Parse the query string into key/value pairs. Duplicate keys keep
    /// the last value.
    pub fn query_params(&self) -> HashMap<String, String> {
        self.query
            .as_deref()
            .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
            .map(|pairs| pairs.into_iter().collect())
            .unwrap_or_default()
    }
}

/// A parsed request, ready for dispatch.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    /// HTTP verb.
    pub method: Method,

    /// Target resource name from the `resource` query parameter.
    pub resource: Option<String>,

    /// Record identifier from the `id` query parameter.
    pub id: Option<u64>,

    /// Remaining query parameters, with `resource` and `id` stripped.
    pub params: HashMap<String, String>,

    /// Decoded JSON body, present only for POST/PUT/PATCH.
    pub body: Option<Value>,
}

impl IncomingRequest {
    /// Parse a raw request into its protocol form.
    ///
    /// Fails with a 400 validation error when the `id` parameter is not a
    /// non-negative integer or when a present body is not valid JSON.
    pub fn parse(raw: &RawRequest) -> Result<Self, ApiError> {
        let mut params = raw.query_params();

        let resource = params.remove("resource").filter(|r| !r.is_empty());

        let id = match params.remove("id") {
            Some(value) => Some(value.parse::<u64>().map_err(|_| {
                ApiError::validation(format!("id must be a non-negative integer, got '{value}'"))
            })?),
            None => None,
        };

        // Credential parameter belongs to the auth gate, not to managers.
        params.remove("api_key");

        let body = if matches!(raw.method, Method::POST | Method::PUT | Method::PATCH)
            && !raw.body.is_empty()
        {
            let value = serde_json::from_slice::<Value>(&raw.body)
                .map_err(|e| ApiError::validation(format!("request body is not valid JSON: {e}")))?;
            Some(value)
        } else {
            None
        };

        Ok(Self {
            method: raw.method.clone(),
            resource,
            id,
            params,
            body,
        })
    }
}
