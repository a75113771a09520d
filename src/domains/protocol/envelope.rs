//! Response envelope types.
//!
//! Every response the gateway emits, success or error, is a single
//! [`Envelope`] serialized as JSON. Paginated listings wrap their items
//! together with a [`Pagination`] block inside the envelope's `data` field.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The uniform response body shared by all gateway responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the request succeeded.
    pub success: bool,

    /// Human-readable outcome message.
    pub message: String,

    /// Payload for successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Structured detail for error responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of records matching the filter.
    pub total: u64,

    /// Current page number, 1-based.
    pub page: u64,

    /// Page size used for this response.
    pub limit: u64,

    /// Total number of pages: ceil(total / limit).
    pub pages: u64,
}

impl Pagination {
    /// Compute pagination metadata. `limit` is guaranteed >= 1 upstream
    /// by filter clamping, so the division cannot be by zero.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            limit,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// A terminal response: status code plus envelope body.
///
/// Exactly one `Reply` is produced per request; once built, no further
/// processing happens for that request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl Reply {
    /// Successful response with payload (200).
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope {
                success: true,
                message: message.into(),
                data: Some(data),
                errors: None,
            },
        }
    }

    /// Successful creation response (201).
    pub fn created(data: Value, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::success(data, message)
        }
    }

    /// Paginated listing response (200).
    pub fn paginated(
        items: Vec<Value>,
        total: u64,
        page: u64,
        limit: u64,
        message: impl Into<String>,
    ) -> Self {
        let pagination = Pagination::new(total, page, limit);
        Self::success(
            json!({
                "items": items,
                "pagination": pagination,
            }),
            message,
        )
    }

    /// Error response with optional structured detail.
    pub fn error(status: StatusCode, message: impl Into<String>, errors: Option<Value>) -> Self {
        Self {
            status,
            envelope: Envelope {
                success: false,
                message: message.into(),
                data: None,
                errors,
            },
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
