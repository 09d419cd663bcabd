use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use ctx_capability::CtxResult;
use logger_redacted::{redacted_debug, redacted_info};
use schema_registry::SchemaKind;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
};

pub const INVALID_CTX_INPUT_MESSAGE: &str = "Invalid Input: Expected string or { capability: string }";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";

/// 200 for a valid verdict, 400 for an invalid one. The body is the same
/// shape either way.
fn verdict<T: Serialize>(valid: bool, body: T) -> Response {
    let status = if valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(body)).into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn parse_json(body: &Bytes) -> ApiResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Malformed JSON body: {e}")))
}

/// Validate an AIP-1 certificate. Accepts raw PEM or `{ "pem": "..." }`.
pub async fn validate_aip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let pem_text = match is_json(&headers).then(|| parse_json(&body)).transpose()? {
        Some(Value::Object(map)) => match map.get("pem") {
            Some(Value::String(pem)) => pem.clone(),
            _ => String::from_utf8_lossy(&body).into_owned(),
        },
        _ => String::from_utf8_lossy(&body).into_owned(),
    };

    redacted_debug!(state.redactor, &pem_text, "Validating AIP-1 certificate");
    let result = state.aip.validate(&pem_text);

    info!(
        valid = result.valid(),
        failed = result.failures().count(),
        "AIP-1 validation complete"
    );
    Ok(verdict(result.valid(), result))
}

/// Validate a CTX-1 capability string. Accepts raw text, a JSON string or
/// `{ "capability": "..." }`.
pub async fn validate_ctx(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let input = if is_json(&headers) {
        match parse_json(&body)? {
            Value::String(capability) => capability,
            Value::Object(map) => match map.get("capability") {
                Some(Value::String(capability)) => capability.clone(),
                _ => return Ok(invalid_ctx_input()),
            },
            _ => return Ok(invalid_ctx_input()),
        }
    } else {
        String::from_utf8_lossy(&body).into_owned()
    };

    let result = ctx_capability::validate_ctx(&input);
    redacted_info!(state.redactor, &input, valid = result.valid, "CTX-1 validation complete");
    Ok(verdict(result.valid, result))
}

fn invalid_ctx_input() -> Response {
    verdict(
        false,
        CtxResult {
            valid: false,
            message: INVALID_CTX_INPUT_MESSAGE.to_string(),
        },
    )
}

fn validate_schema(state: &AppState, kind: SchemaKind, body: &Bytes) -> ApiResult<Response> {
    let document = parse_json(body)?;
    let report = state.schemas.validate(kind, &document)?;

    info!(
        kind = %kind,
        valid = report.valid,
        violations = report.errors.len(),
        "Schema validation complete"
    );
    Ok(verdict(report.valid, report))
}

pub async fn validate_adp(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    validate_schema(&state, SchemaKind::Adp, &body)
}

pub async fn validate_pvs(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    validate_schema(&state, SchemaKind::Pvs, &body)
}

pub async fn validate_manifest(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    validate_schema(&state, SchemaKind::Manifest, &body)
}

/// Fallback for every non-POST method on a validation route.
pub async fn method_not_allowed() -> Response {
    let mut response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": METHOD_NOT_ALLOWED_MESSAGE })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("POST"));
    response
}
