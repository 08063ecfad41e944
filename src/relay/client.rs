//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Execute one relayed request with the configured total timeout
//! - Translate the remote response into a [`ProxyResponse`]
//! - Classify client failures into [`RelayError`] variants
//!
//! # Design Decisions
//! - One `reqwest::Client` per server; its pool is invisible to callers
//! - Proxy environment variables are ignored (`no_proxy`)
//! - Any received status, 4xx/5xx included, is a successful relay

use hyper::ext::ReasonPhrase;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::relay::error::{error_chain, RelayError};
use crate::relay::request::OutboundRequest;
use crate::relay::types::ProxyResponse;

/// Client that performs relayed requests against remote origins.
#[derive(Clone)]
pub struct UpstreamClient {
    inner: reqwest::Client,
    user_agent: String,
}

impl UpstreamClient {
    /// Build a client from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::limited(config.max_redirects))
            .no_proxy()
            .build()
            .map_err(RelayError::from_client)?;

        Ok(Self {
            inner,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Default `User-Agent` placed before payload headers.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Perform the request. `Err` only when no HTTP response was obtained.
    pub async fn execute(&self, req: OutboundRequest) -> Result<ProxyResponse, RelayError> {
        let mut builder = self
            .inner
            .request(req.method, req.url)
            .headers(req.headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(RelayError::from_client)?;

        let status = response.status();
        let status_text = reason_phrase(&response);
        let headers = flatten_headers(response.headers());
        // The status line already arrived; a failed body read keeps it.
        let body = match response.bytes().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Failed to read upstream body");
                format!("failed to read response body: {}", error_chain(&e))
            }
        };

        Ok(ProxyResponse {
            status: status.as_u16(),
            status_text,
            body,
            headers,
        })
    }
}

/// The phrase the remote sent on its status line.
///
/// hyper only records the phrase when it differs from the canonical one, so
/// a missing extension means the canonical phrase was sent.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response.status().canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Collapse a header map into one string per (lowercase) name.
///
/// Repeated headers are joined with `", "` in arrival order; bytes that are
/// not UTF-8 are replaced.
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    out
}
