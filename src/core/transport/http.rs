//! HTTP transport implementation.
//!
//! One `any`-method route at the configured gateway path carries the whole
//! protocol; `GET /` describes the API and `GET /health` serves liveness
//! probes. When CORS is enabled, permissive `Access-Control-Allow-*` headers
//! are appended to every response; preflight OPTIONS requests still reach
//! the gateway, which answers them with its own success envelope.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Request, State},
    response::IntoResponse,
    routing::{any, get},
};
use http::HeaderValue;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::Gateway;
use crate::domains::protocol::{ApiError, RawRequest, Reply};

use super::config::HttpConfig;
use super::error::{TransportError, TransportResult};

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Build the axum router serving the gateway.
    pub fn router(&self, gateway: Gateway) -> Router {
        let mut app = Router::new()
            .route(&self.config.path, any(handle_api))
            .route("/health", get(health_check))
            .route("/", get(index))
            .with_state(gateway)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            // Plain header layers, not a preflight-answering CORS service:
            // OPTIONS must fall through to the gateway's envelope.
            app = app
                .layer(SetResponseHeaderLayer::if_not_present(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type, X-Api-Key, Authorization"),
                ));
        }

        app
    }

    /// Run the HTTP transport. Blocks until shutdown.
    pub async fn run(self, gateway: Gateway) -> TransportResult<()> {
        let addr = self.config.address();
        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };

        let app = self.router(gateway);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  Gateway: ANY {}", self.config.path);
        info!("  Health:  GET /health");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - describes the API surface.
async fn index(State(gateway): State<Gateway>) -> impl IntoResponse {
    Json(gateway.describe())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Gateway endpoint - converts the axum request into the transport-neutral
/// form and hands it to the gateway.
async fn handle_api(
    State(gateway): State<Gateway>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
) -> Reply {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::validation(format!("unable to read request body: {e}"))
                .to_reply(false);
        }
    };

    let raw = RawRequest {
        method: parts.method,
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        remote_addr: addr.ip().to_string(),
        body,
    };

    gateway.handle(raw).await
}
