//! Axum handlers.
//!
//! Each handler receives [`HttpState`] via [`axum::extract::State`] and
//! returns an axum [`Response`] carrying a [`ResponseEnvelope`].

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::HttpState;
use crate::bfhl::ResponseEnvelope;
use crate::error::ApiError;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Decode a request body.
///
/// Only objects and arrays are accepted at the top level; a bare scalar is
/// treated as malformed. An empty body decodes as `{}` so it fails the
/// single-key check rather than the JSON check.
fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    match bytes.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        None => Ok(Value::Object(Map::new())),
        Some(b'{') | Some(b'[') => serde_json::from_slice(bytes).map_err(|e| {
            debug!(error = %e, "rejecting malformed JSON body");
            ApiError::InvalidJson
        }),
        Some(_) => Err(ApiError::InvalidJson),
    }
}

/// `true` when the media type is `application/json`, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /health
pub(super) async fn health(State(state): State<HttpState>) -> Response {
    let body = ResponseEnvelope::health(state.dispatcher.official_email());
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /bfhl
///
/// A body not declared as JSON is ignored and handled as `{}`.
pub(super) async fn bfhl(
    State(state): State<HttpState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if !is_json(&headers) {
        debug!(content_type = ?headers.get(CONTENT_TYPE), "ignoring non-JSON body");
        return respond(state.dispatcher.handle(&Value::Object(Map::new())).await);
    }

    let bytes = match body {
        Ok(bytes) => bytes,
        Err(rejection) => {
            let status = rejection.status();
            warn!(%status, "request body rejected: {}", rejection.body_text());
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "Request body too large.".to_string()
            } else {
                rejection.body_text()
            };
            return (status, Json(ResponseEnvelope::failure(message))).into_response();
        }
    };

    let result = match parse_body(&bytes) {
        Ok(value) => state.dispatcher.handle(&value).await,
        Err(e) => Err(e),
    };
    respond(result)
}

fn respond(result: Result<ResponseEnvelope, ApiError>) -> Response {
    match result {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(e) => {
            debug!(status = %e.status(), error = %e, "bfhl request rejected");
            e.into_response()
        }
    }
}

/// Fallback for any unmatched method/path.
pub(super) async fn not_found(method: Method, uri: Uri) -> Response {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path());
    let body = ResponseEnvelope::failure(format!("Route not found: {method} {target}"));
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
