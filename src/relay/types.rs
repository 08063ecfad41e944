//! Wire types for the `/api/proxy` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Outbound request described by the browser client.
///
/// Only `url` is typed at parse time. The other fields stay loose JSON so a
/// wrong-typed value is reported as a relay failure, not a bad payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyRequest {
    /// Target URL; must be absolute http(s).
    pub url: Option<String>,

    /// HTTP method, `GET` when absent.
    pub method: Value,

    /// Headers added to the outbound request.
    pub headers: Value,

    /// Request body, sent only when non-empty.
    pub body: Value,
}

/// Normalized result of a relayed request.
///
/// `status == 0` means no HTTP response was obtained; `body` then holds
/// the failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

/// Label used when the remote could not be reached at all.
pub const CONNECTION_ERROR: &str = "Connection Error";

/// Label used for every other relay failure.
pub const GENERIC_ERROR: &str = "Error";

impl ProxyResponse {
    /// A status-0 response describing a failure.
    pub fn failure(status_text: &str, reason: impl Into<String>) -> Self {
        Self {
            status: 0,
            status_text: status_text.to_string(),
            body: reason.into(),
            headers: BTreeMap::new(),
        }
    }
}
