//! Response helpers shared by all handlers.
//!
//! Every error the server itself produces is `{"error": <message>}` with
//! `Content-Type: application/json`. CORS headers are added to every
//! response by the router's header layers, not here.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relay::Rejection;

pub const ALLOW_ORIGIN: HeaderValue = HeaderValue::from_static("*");
pub const ALLOW_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, OPTIONS");
pub const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type");

/// Body of every server-generated error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON error response with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// `{"error":"Not found"}` with 404.
pub fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Not found")
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        json_error(StatusCode::BAD_REQUEST, self.to_string())
    }
}
