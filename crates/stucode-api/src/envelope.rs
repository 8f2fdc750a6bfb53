//! Response constructors: every HTTP outcome is written as the uniform
//! `{statusCode, message, errorCode?, data?, count?}` envelope with the
//! matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use stucode_types::envelope::Envelope;
use stucode_types::messages::error_codes;

pub fn ok<T: Serialize>(data: T, count: Option<u64>) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => respond(StatusCode::OK, None, None, Some(value), count),
        Err(err) => {
            error!("response serialization failed: {}", err);
            internal_error()
        }
    }
}

/// Bare 200 envelope with no `data`/`count` keys.
pub fn ok_empty() -> Response {
    respond(StatusCode::OK, None, None, None, None)
}

pub fn created<T: Serialize>(data: T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => respond(StatusCode::CREATED, None, None, Some(value), None),
        Err(err) => {
            error!("response serialization failed: {}", err);
            internal_error()
        }
    }
}

pub fn bad_request(message: &str) -> Response {
    respond(
        StatusCode::BAD_REQUEST,
        Some(message),
        Some(error_codes::BAD_REQUEST),
        None,
        None,
    )
}

pub fn unauthorized(message: &str) -> Response {
    respond(
        StatusCode::UNAUTHORIZED,
        Some(message),
        Some(error_codes::UNAUTHORIZED),
        None,
        None,
    )
}

pub fn forbidden(message: &str) -> Response {
    respond(
        StatusCode::FORBIDDEN,
        Some(message),
        Some(error_codes::FORBIDDEN),
        None,
        None,
    )
}

pub fn not_found(message: &str) -> Response {
    respond(
        StatusCode::NOT_FOUND,
        Some(message),
        Some(error_codes::NOT_FOUND),
        None,
        None,
    )
}

pub fn conflict(message: &str) -> Response {
    respond(
        StatusCode::CONFLICT,
        Some(message),
        Some(error_codes::CONFLICT),
        None,
        None,
    )
}

/// Generic 500; nothing about the underlying fault reaches the client.
pub fn internal_error() -> Response {
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
        Some(error_codes::INTERNAL_SERVER_ERROR),
        None,
        None,
    )
}

/// Arbitrary status with an explicit message, for outcomes outside the
/// named constructors.
pub fn custom(status: StatusCode, message: &str, error_code: Option<&str>) -> Response {
    respond(status, Some(message), error_code, None, None)
}

fn respond(
    status: StatusCode,
    message: Option<&str>,
    error_code: Option<&str>,
    data: Option<Value>,
    count: Option<u64>,
) -> Response {
    let envelope = Envelope {
        status_code: status.as_u16(),
        message: message
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unknown")
            .to_string(),
        error_code: error_code.map(str::to_string),
        data,
        count,
    };

    (status, Json(envelope)).into_response()
}
