//! HTTP-level integration tests.
//!
//! Exercise the full stack through the axum router with `oneshot`, the same
//! way a client would: raw URIs, headers, and JSON bodies in, envelope JSON
//! out.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use rest_gateway::core::transport::HttpTransport;
use rest_gateway::core::{Config, Gateway};
use rest_gateway::domains::managers::{MemoryStore, default_registry};

const KEY: &str = "integration-test-key";

fn app() -> Router {
    app_with(|_| {})
}

fn app_with(tweak: impl FnOnce(&mut Config)) -> Router {
    let mut config = Config::default();
    config.auth.api_key = KEY.to_string();
    tweak(&mut config);
    let transport = HttpTransport::new(config.http.clone());
    let store = Arc::new(MemoryStore::new());
    let gateway = Gateway::new(config, default_registry(store));
    transport.router(gateway)
}

fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
    request_from(method, uri, body, "127.0.0.1:4000")
}

fn request_from(method: &str, uri: &str, body: &str, peer: &str) -> Request<Body> {
    let addr: SocketAddr = peer.parse().unwrap();
    let body = if body.is_empty() {
        Body::empty()
    } else {
        Body::from(body.to_string())
    };
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .extension(ConnectInfo(addr))
        .body(body)
        .unwrap()
}

async fn json_body(response: http::Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_credential_is_401_envelope() {
    let response = app()
        .oneshot(request("GET", "/api?resource=products", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "invalid API key");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_api_key_accepted_via_query_param() {
    let response = app()
        .oneshot(request(
            "GET",
            &format!("/api?resource=products&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_allow_list_rejects_other_addresses() {
    let app = app_with(|c| c.auth.allowed_ips = vec!["10.0.0.1".to_string()]);
    let response = app
        .oneshot(request_from(
            "GET",
            &format!("/api?resource=products&api_key={KEY}"),
            "",
            "203.0.113.9:5000",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_options_preflight_succeeds_without_credential() {
    let response = app()
        .oneshot(request("OPTIONS", "/api", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // Preflight answers carry the CORS headers alongside the envelope.
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_resource_is_404() {
    let response = app()
        .oneshot(request(
            "GET",
            &format!("/api?resource=widgets&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("widgets"));
}

#[tokio::test]
async fn test_create_then_fetch_product() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api?resource=products&api_key={KEY}"),
            r#"{"name": "Café Filter", "price": 12.5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    // Create answers with the new identifier only; field state comes
    // from a subsequent fetch.
    let id = body["data"]["id"].as_u64().unwrap();
    assert!(body["data"].get("name").is_none());

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api?resource=product&id={id}&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["name"], "Café Filter");
    // Defaults filled in on create.
    assert_eq!(body["data"]["active"], true);
    assert_eq!(body["data"]["quantity"], 0);
}

#[tokio::test]
async fn test_create_without_name_is_400() {
    let response = app()
        .oneshot(request(
            "POST",
            &format!("/api?resource=products&api_key={KEY}"),
            r#"{"price": 3.0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_without_id_is_400() {
    let response = app()
        .oneshot(request(
            "PUT",
            &format!("/api?resource=products&api_key={KEY}"),
            r#"{"name": "New Name"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let response = app()
        .oneshot(request(
            "POST",
            &format!("/api?resource=products&api_key={KEY}"),
            "{not json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_record_is_404() {
    let response = app()
        .oneshot(request(
            "DELETE",
            &format!("/api?resource=products&id=999&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_limit_clamped_to_max() {
    let app = app();

    for i in 0..5 {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                &format!("/api?resource=products&api_key={KEY}"),
                &format!(r#"{{"name": "Item {i}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Default max is 100; an oversized limit is clamped, not rejected.
    let response = app
        .oneshot(request(
            "GET",
            &format!("/api?resource=products&limit=5000&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["pagination"]["limit"], 100);
    assert_eq!(body["data"]["pagination"]["total"], 5);
    assert_eq!(body["data"]["pagination"]["pages"], 1);
}

#[tokio::test]
async fn test_pagination_pages_and_navigation() {
    let app = app();

    for i in 0..7 {
        app.clone()
            .oneshot(request(
                "POST",
                &format!("/api?resource=products&api_key={KEY}"),
                &format!(r#"{{"name": "P{i}"}}"#),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api?resource=products&page=2&limit=3&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["limit"], 3);
    assert_eq!(pagination["total"], 7);
    assert_eq!(pagination["pages"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_order_create_is_501() {
    let response = app()
        .oneshot(request(
            "POST",
            &format!("/api?resource=orders&api_key={KEY}"),
            r#"{"customer": 1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_categories_answer_501() {
    let response = app()
        .oneshot(request(
            "GET",
            &format!("/api?resource=categories&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_debug_flag_exposes_error_detail() {
    // Forcing an internal error from outside is not possible with the memory
    // store, so assert the debug path on a client error instead: 4xx detail
    // is identical with and without debug.
    let app = app_with(|c| c.api.debug = true);
    let response = app
        .oneshot(request(
            "GET",
            &format!("/api?resource=products&id=abc&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("id"));
}

#[tokio::test]
async fn test_head_request_is_405() {
    let response = app()
        .oneshot(request(
            "HEAD",
            &format!("/api?resource=products&api_key={KEY}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
