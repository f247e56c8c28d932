//! HTTP response constructors
//!
//! Builders for the JSON and plain-text responses the service emits,
//! decoupled from the handlers that choose them.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build a pretty-printed JSON response.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build(
                StatusCode::INTERNAL_SERVER_ERROR,
                "application/json",
                Bytes::from(r#"{"error":"Internal server error"}"#),
            );
        }
    };

    build(status, "application/json", Bytes::from(json))
}

/// 400 Bad Request with a JSON error body.
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    build(
        StatusCode::BAD_REQUEST,
        "application/json",
        Bytes::from(body.to_string()),
    )
}

/// 400 response for any (path, method) pair outside the route table.
pub fn invalid_url() -> Response<Full<Bytes>> {
    build(
        StatusCode::BAD_REQUEST,
        "text/plain",
        Bytes::from("Invalid URL"),
    )
}

/// 404 with a caller-facing plain-text message.
pub fn not_found(message: &'static str) -> Response<Full<Bytes>> {
    build(StatusCode::NOT_FOUND, "text/plain", Bytes::from(message))
}

/// 413 Payload Too Large response.
pub fn payload_too_large() -> Response<Full<Bytes>> {
    build(
        StatusCode::PAYLOAD_TOO_LARGE,
        "text/plain",
        Bytes::from("413 Payload Too Large"),
    )
}

/// 500 response for a failed backing-file write.
pub fn persistence_failed() -> Response<Full<Bytes>> {
    build(
        StatusCode::INTERNAL_SERVER_ERROR,
        "application/json",
        Bytes::from(r#"{"error":"Failed to persist student records"}"#),
    )
}

fn build(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build {status} response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}
