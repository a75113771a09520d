//! Request dispatch - maps a parsed request onto a manager operation.
//!
//! Routing resolves the resource name through the registry and invokes the
//! manager method matching the HTTP verb, enforcing the id and body
//! requirements before a manager is ever touched.

use http::Method;
use tracing::debug;

use crate::core::config::ApiConfig;
use crate::domains::managers::ManagerRegistry;

use super::error::ApiError;
use super::filter::QueryFilter;
use super::request::IncomingRequest;
use super::envelope::Reply;

/// Dispatch a parsed request to its resource manager.
///
/// Manager errors propagate to the caller; the entry point owns the final
/// containment that turns unexpected failures into a 500.
pub async fn dispatch(
    request: IncomingRequest,
    registry: &ManagerRegistry,
    api: &ApiConfig,
) -> Result<Reply, ApiError> {
    let Some(name) = request.resource.as_deref() else {
        return Err(ApiError::validation(
            "no resource specified; use ?resource=products or ?resource=orders",
        ));
    };

    let Some(manager) = registry.resolve(name) else {
        return Err(ApiError::not_found(format!("unknown resource: {name}")));
    };

    debug!(resource = name, method = %request.method, id = ?request.id, "dispatching");

    match request.method {
        Method::GET => match request.id {
            Some(id) => manager.get_one(id).await,
            None => {
                let filter = QueryFilter::from_params(&request.params, api);
                manager.get_all(filter).await
            }
        },
        Method::POST => {
            let body = require_body(request.body)?;
            manager.create(body).await
        }
        Method::PUT | Method::PATCH => {
            let Some(id) = request.id else {
                return Err(ApiError::validation("an id is required to update a resource"));
            };
            let body = require_body(request.body)?;
            manager.update(id, body).await
        }
        Method::DELETE => {
            let Some(id) = request.id else {
                return Err(ApiError::validation("an id is required to delete a resource"));
            };
            manager.delete(id).await
        }
        other => Err(ApiError::method_not_allowed(format!(
            "unsupported HTTP method: {other}"
        ))),
    }
}

fn require_body(body: Option<serde_json::Value>) -> Result<serde_json::Value, ApiError> {
    body.ok_or_else(|| ApiError::validation("a JSON request body is required"))
}
