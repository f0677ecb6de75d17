//! Consistent JSON error responses.

use super::dto::FieldError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Responds with `{"error": message}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Responds 400 with the list of validation problems.
#[must_use]
pub fn validation_error(details: &[FieldError]) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Invalid request",
            "details": details,
        })),
    )
        .into_response()
}
