//! Gateway implementation and per-request lifecycle.
//!
//! The [`Gateway`] composes the full request pipeline: OPTIONS short-circuit,
//! authentication gate, request parsing, dispatch to the resolved manager,
//! and final containment. [`Gateway::handle`] is infallible by construction:
//! every outcome, including an unanticipated failure, becomes exactly one
//! response envelope.

use std::sync::Arc;

use http::Method;
use serde_json::{Value, json};
use tracing::{error, info, instrument};

use crate::domains::managers::ManagerRegistry;
use crate::domains::protocol::{self, IncomingRequest, RawRequest, Reply};

use super::config::Config;
use super::security::authenticate;

/// The gateway: immutable configuration plus the manager registry.
///
/// Cheap to clone; both fields are shared handles established at startup.
#[derive(Clone)]
pub struct Gateway {
    config: Arc<Config>,
    registry: Arc<ManagerRegistry>,
}

impl Gateway {
    /// Create a gateway from configuration and a populated registry.
    pub fn new(config: Config, registry: ManagerRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Get the gateway configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Registered resource names, for the transport's index route.
    pub fn resource_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Handle one request end to end, producing exactly one envelope.
    #[instrument(skip_all, fields(method = %raw.method, remote = %raw.remote_addr))]
    pub async fn handle(&self, raw: RawRequest) -> Reply {
        // Pre-flight requests bypass authentication so cross-origin
        // handshakes work without credentials.
        if raw.method == Method::OPTIONS {
            return Reply::success(Value::Array(vec![]), "OK");
        }

        match self.process(raw).await {
            Ok(reply) => {
                info!(status = reply.status.as_u16(), "request completed");
                reply
            }
            Err(err) => {
                let reply = err.to_reply(self.config.api.debug);
                if reply.status.is_server_error() {
                    error!(status = reply.status.as_u16(), %err, "request failed");
                } else {
                    info!(status = reply.status.as_u16(), %err, "request rejected");
                }
                reply
            }
        }
    }

    /// The fallible pipeline: auth, parse, dispatch.
    async fn process(&self, raw: RawRequest) -> Result<Reply, protocol::ApiError> {
        authenticate(&raw, &self.config.auth)?;
        let request = IncomingRequest::parse(&raw)?;
        protocol::dispatch(request, &self.registry, &self.config.api).await
    }

    /// Metadata body for the transport's index route.
    pub fn describe(&self) -> Value {
        json!({
            "name": self.config.server.name,
            "version": self.config.server.version,
            "resources": self.resource_names(),
            "usage": {
                "list":   "GET    ?resource=<name>[&page=N&limit=N&...filters]",
                "get":    "GET    ?resource=<name>&id=<n>",
                "create": "POST   ?resource=<name>  (JSON body)",
                "update": "PUT    ?resource=<name>&id=<n>  (JSON body)",
                "delete": "DELETE ?resource=<name>&id=<n>",
            },
        })
    }
}
