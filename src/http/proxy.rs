//! `POST /api/proxy` handler.
//!
//! Outer status is 200 whenever the relay ran; only payload problems are 4xx.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::RequestIdExt;
use crate::http::response::json_error;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::{self, parse_request};

pub async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = headers.request_id().unwrap_or("unknown");

    let raw = match body {
        Ok(raw) => raw,
        Err(rejection) => {
            tracing::warn!(request_id = %request_id, error = %rejection, "Unreadable proxy payload");
            metrics::record_request("proxy", rejection.status().as_u16());
            return json_error(rejection.status(), rejection.body_text());
        }
    };

    let req = match parse_request(&raw) {
        Ok(req) => req,
        Err(rejection) => {
            tracing::debug!(request_id = %request_id, reason = %rejection, "Rejected proxy payload");
            metrics::record_request("proxy", 400);
            return rejection.into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        url = %req.url,
        "Relaying request"
    );

    let response = relay::relay(&state.client, &req).await;
    metrics::record_request("proxy", 200);
    Json(response).into_response()
}
