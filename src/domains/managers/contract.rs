//! The resource manager contract.
//!
//! Every resource exposed through the gateway implements [`ResourceManager`].
//! Default method bodies answer 501 Not Implemented, so a manager may expose
//! only the subset of operations that makes sense for its domain — a valid
//! terminal outcome, not a gateway failure.

use async_trait::async_trait;
use serde_json::Value;

use crate::domains::protocol::{ApiError, QueryFilter, Reply};

/// Uniform CRUD contract for a resource.
#[async_trait]
pub trait ResourceManager: Send + Sync {
    /// List records under a filter, emitting a paginated envelope.
    ///
    /// Implementations must derive the total count and the returned page
    /// from the same filter criteria.
    async fn get_all(&self, filter: QueryFilter) -> Result<Reply, ApiError> {
        let _ = filter;
        Err(ApiError::not_implemented(
            "listing is not supported for this resource",
        ))
    }

    /// Fetch a single record by id, or 404 if no record matches.
    async fn get_one(&self, id: u64) -> Result<Reply, ApiError> {
        let _ = id;
        Err(ApiError::not_implemented(
            "fetching is not supported for this resource",
        ))
    }

    /// Validate and persist a new record; 201 with the new identifier on
    /// success, 400 before persistence when required fields are missing.
    async fn create(&self, body: Value) -> Result<Reply, ApiError> {
        let _ = body;
        Err(ApiError::not_implemented(
            "creation is not supported for this resource",
        ))
    }

    /// Partial update: apply only the fields present in `body`, leaving
    /// absent fields untouched. 404 if the record does not exist.
    async fn update(&self, id: u64, body: Value) -> Result<Reply, ApiError> {
        let _ = (id, body);
        Err(ApiError::not_implemented(
            "updating is not supported for this resource",
        ))
    }

    /// Remove a record by id. 404 if absent; a failed removal of an
    /// existing record is a 500, distinct from not-found.
    async fn delete(&self, id: u64) -> Result<Reply, ApiError> {
        let _ = id;
        Err(ApiError::not_implemented(
            "deletion is not supported for this resource",
        ))
    }
}
