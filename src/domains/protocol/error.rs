//! Protocol-level error taxonomy.
//!
//! Every failure a request can hit maps to one [`ApiError`] variant, and
//! every variant maps to exactly one HTTP status code. The error is rendered
//! through the same envelope mechanism as successful responses.

use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use super::envelope::Reply;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, bad parameter, or missing required field (400).
    #[error("{0}")]
    Validation(String),

    /// Missing or mismatched credential (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Caller's network origin is not on the allow-list (403).
    #[error("{0}")]
    Forbidden(String),

    /// Unknown resource name or missing record (404).
    #[error("{0}")]
    NotFound(String),

    /// HTTP verb not supported by the gateway (405).
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Operation deliberately not exposed by a manager (501).
    #[error("{0}")]
    NotImplemented(String),

    /// Persistence failure or unexpected fault (500). The message is
    /// logged but only surfaced to clients in debug mode.
    #[error("server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a validation error (400).
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unauthorized error (401).
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a forbidden error (403).
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a not-found error (404).
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a method-not-allowed error (405).
    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        Self::MethodNotAllowed(msg.into())
    }

    /// Create a not-implemented error (501).
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create an internal error (500).
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(anyhow::anyhow!("{}", msg.into()))
    }

    /// The HTTP status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render this error as a terminal error envelope.
    ///
    /// Internal errors hide their cause unless `debug` is set, in which
    /// case the message and full error chain are attached under `errors`.
    pub fn to_reply(&self, debug: bool) -> Reply {
        match self {
            Self::Internal(source) => {
                if debug {
                    Reply::error(
                        self.status(),
                        source.to_string(),
                        Some(json!({
                            "message": source.to_string(),
                            "trace": format!("{source:?}"),
                        })),
                    )
                } else {
                    Reply::error(self.status(), "server error", None)
                }
            }
            other => Reply::error(other.status(), other.to_string(), None),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(format!("invalid JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::method_not_allowed("x").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::not_implemented("x").status(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ApiError::from(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_hides_cause_without_debug() {
        let err = ApiError::from(anyhow!("db connection refused"));
        let reply = err.to_reply(false);
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.envelope.message, "server error");
        assert!(reply.envelope.errors.is_none());
    }

    #[test]
    fn test_internal_exposes_cause_in_debug() {
        let err = ApiError::from(anyhow!("db connection refused"));
        let reply = err.to_reply(true);
        assert!(reply.envelope.message.contains("db connection refused"));
        let detail = reply.envelope.errors.unwrap();
        assert!(detail["trace"].as_str().unwrap().contains("db connection"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let reply = ApiError::not_found("unknown resource: widgets").to_reply(false);
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(reply.envelope.message.contains("widgets"));
        assert!(!reply.envelope.success);
    }

    #[test]
    fn test_json_error_becomes_validation() {
        let bad: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("{bad json");
        let err: ApiError = bad.unwrap_err().into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
