//! Proxy relay subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/proxy body
//!     → request.rs (parse JSON, validate url/scheme)   ── Rejection → 4xx
//!     → request.rs (typed method, URL, merged headers) ─┐
//!     → client.rs (one outbound call, 15s timeout)     ─┴ RelayError → status 0
//!     → ProxyResponse (outer 200)
//! ```
//!
//! # Design Decisions
//! - Remote error statuses are data, not failures
//! - Every failure kind is an enum variant; nothing is caught generically
//! - No retries, no caching, no state shared between requests

pub mod client;
pub mod error;
pub mod request;
pub mod types;

use std::time::Instant;

pub use client::UpstreamClient;
pub use error::{Rejection, RelayError};
pub use request::{parse_request, OutboundRequest, ValidatedRequest};
pub use types::{ProxyRequest, ProxyResponse};

use crate::observability::metrics;

/// Run a validated request to completion. Never fails: errors become a
/// status-0 [`ProxyResponse`].
pub async fn relay(client: &UpstreamClient, req: &ValidatedRequest) -> ProxyResponse {
    let start = Instant::now();

    let result = async {
        let outbound = OutboundRequest::build(req, client.user_agent())?;
        tracing::debug!(method = %outbound.method, url = %outbound.url, "Sending request");
        client.execute(outbound).await
    }
    .await;

    match result {
        Ok(response) => {
            tracing::debug!(
                url = %req.url,
                status = response.status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Relayed request"
            );
            metrics::record_upstream("response", start);
            response
        }
        Err(e) => {
            tracing::warn!(
                url = %req.url,
                outcome = e.outcome(),
                error = %e,
                "Relay failed"
            );
            metrics::record_upstream(e.outcome(), start);
            e.into()
        }
    }
}
