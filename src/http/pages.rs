//! Static page, health check and fallthrough handlers.

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::response::{json_error, not_found as not_found_response};
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
}

/// `GET /` and `GET /index.html`.
pub async fn index(State(state): State<AppState>) -> Response {
    let path = &state.config.assets.index_path;
    match tokio::fs::read(path).await {
        Ok(page) => {
            metrics::record_request("index", 200);
            (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                page,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read index page");
            metrics::record_request("index", 500);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Page unavailable")
        }
    }
}

/// `GET /api/health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    metrics::record_request("health", 200);
    Json(HealthStatus {
        status: "ok",
        service: state.config.service_name.clone(),
    })
}

/// CORS preflight: 204, no body.
pub async fn preflight() -> StatusCode {
    metrics::record_request("preflight", 204);
    StatusCode::NO_CONTENT
}

/// Known path, unsupported method.
pub async fn not_found() -> Response {
    metrics::record_request("not_found", 404);
    not_found_response()
}

/// Unknown path: preflight for OPTIONS, 404 for everything else.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await.into_response()
    } else {
        not_found().await
    }
}
