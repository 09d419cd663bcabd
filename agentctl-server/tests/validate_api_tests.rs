//! HTTP tests for the validation routes
//!
//! These drive the full router (middleware included) with `oneshot`, so
//! status mapping, body decoding and the 405 fallback are covered end to
//! end without binding a socket.

use agentctl_server::{create_app, AppState, Settings};
use aip_identity::{testing::AgentCertBuilder, AipOid, AipValidator};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use schema_registry::{SchemaKind, SchemaRegistry};
use serde_json::{json, Value};
use tower::ServiceExt;

fn adp_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["run_id", "agent", "started_at"],
        "properties": {
            "run_id": { "type": "string", "minLength": 1 },
            "agent": { "type": "string", "pattern": "^agent:" },
            "started_at": { "type": "string", "format": "date-time" }
        }
    })
}

fn test_app() -> Router {
    let mut schemas = SchemaRegistry::new();
    schemas.insert(SchemaKind::Adp, &adp_schema()).unwrap();
    let state = AppState::new(Settings::default(), AipValidator::default(), schemas);
    create_app(state)
}

async fn send(app: Router, method: Method, uri: &str, content_type: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn check_names(body: &Value) -> Vec<String> {
    body["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn aip_valid_certificate_returns_200() {
    let pem = AgentCertBuilder::new().with_standard_extensions().build().unwrap();

    let (status, body) = send(test_app(), Method::POST, "/api/validate/aip", "text/plain", pem).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(
        check_names(&body),
        vec!["Format", "Validity", "Lifetime", "OID: AIP-Version", "OID: Tenant-ID", "OID: Capability-Set"]
    );
}

#[tokio::test]
async fn aip_accepts_pem_envelope() {
    let pem = AgentCertBuilder::new().with_standard_extensions().build().unwrap();
    let payload = json!({ "pem": pem }).to_string();

    let (status, body) = send(test_app(), Method::POST, "/api/validate/aip", "application/json", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn aip_long_lived_certificate_returns_400_with_full_report() {
    let pem = AgentCertBuilder::new()
        .valid_for(Duration::minutes(60))
        .with_extension(AipOid::Version, "1")
        .build()
        .unwrap();

    let (status, body) = send(test_app(), Method::POST, "/api/validate/aip", "text/plain", pem).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], false);
    let checks = body["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 6);
    assert_eq!(checks[2]["message"], "Duration is 60.0 mins (Max allowed: 15 mins)");
    assert_eq!(checks[4]["passed"], false);
}

#[tokio::test]
async fn aip_expired_certificate_reports_expiration() {
    let not_before = Utc::now() - Duration::minutes(30);
    let pem = AgentCertBuilder::new()
        .valid_between(not_before, not_before + Duration::minutes(10))
        .with_standard_extensions()
        .build()
        .unwrap();

    let (status, body) = send(test_app(), Method::POST, "/api/validate/aip", "text/plain", pem).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["checks"][1]["name"], "Expiration");
}

#[tokio::test]
async fn aip_garbage_returns_single_format_check() {
    let (status, body) = send(test_app(), Method::POST, "/api/validate/aip", "text/plain", "not a certificate").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(check_names(&body), vec!["Format"]);
    assert!(body["checks"][0]["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse certificate: "));
}

#[tokio::test]
async fn aip_empty_body_reports_empty_input() {
    let (status, body) = send(test_app(), Method::POST, "/api/validate/aip", "text/plain", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["checks"][0]["message"], "Failed to parse certificate: Empty Input");
}

#[tokio::test]
async fn ctx_raw_text_and_envelopes() {
    let (status, body) = send(test_app(), Method::POST, "/api/validate/ctx", "text/plain", "perm:files:read").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);

    let payload = json!({ "capability": "agent:planner" }).to_string();
    let (status, _) = send(test_app(), Method::POST, "/api/validate/ctx", "application/json", payload).await;
    assert_eq!(status, StatusCode::OK);

    let payload = json!("tenant:acme:billing").to_string();
    let (status, _) = send(test_app(), Method::POST, "/api/validate/ctx", "application/json", payload).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn ctx_invalid_capability_returns_400() {
    let (status, body) = send(test_app(), Method::POST, "/api/validate/ctx", "text/plain", "perm:files:read:").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid Format."));
}

#[tokio::test]
async fn ctx_wrong_json_shape_is_invalid_input() {
    let payload = json!({ "capability": 42 }).to_string();

    let (status, body) = send(test_app(), Method::POST, "/api/validate/ctx", "application/json", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "valid": false, "message": "Invalid Input: Expected string or { capability: string }" })
    );
}

#[tokio::test]
async fn non_post_methods_return_405() {
    for route in ["aip", "ctx", "adp", "pvs", "manifest"] {
        let uri = format!("/api/validate/{route}");
        let (status, body) = send(test_app(), Method::GET, &uri, "text/plain", "").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "route {route}");
        assert_eq!(body, json!({ "message": "Method Not Allowed" }));
    }
}

#[tokio::test]
async fn adp_document_is_checked_against_schema() {
    let valid = json!({
        "run_id": "run-1",
        "agent": "agent:planner",
        "started_at": "2026-01-01T00:00:00Z"
    });
    let (status, body) = send(test_app(), Method::POST, "/api/validate/adp", "application/json", valid.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true, "errors": [] }));

    let invalid = json!({ "run_id": "", "agent": "planner", "started_at": "2026-01-01T00:00:00Z" });
    let (status, body) = send(test_app(), Method::POST, "/api/validate/adp", "application/json", invalid.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    assert!(body["errors"][0].get("instancePath").is_some());
}

#[tokio::test]
async fn unconfigured_schema_returns_503() {
    let (status, body) = send(test_app(), Method::POST, "/api/validate/pvs", "application/json", "{}").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_type"], "service_unavailable");
    assert_eq!(body["code"], "SERVICE_5004");
}

#[tokio::test]
async fn malformed_json_returns_400_api_error() {
    let (status, body) = send(test_app(), Method::POST, "/api/validate/adp", "application/json", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
    assert!(body["error_id"].is_string());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut settings = Settings::default();
    settings.server.max_body_bytes = 16;
    let app = create_app(AppState::new(settings, AipValidator::default(), SchemaRegistry::new()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/validate/ctx")
        .body(Body::from("perm:".repeat(10)))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_reports_schema_status() {
    let (status, body) = send(test_app(), Method::GET, "/health", "text/plain", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["schemas"]["ADP-1"], true);
    assert_eq!(body["schemas"]["PVS-1"], false);
}
