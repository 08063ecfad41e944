use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Request to relay, mirroring the `/api/proxy` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ProxyRequest {
    /// A GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Normalized result returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ProxyResponse {
    /// True when the remote could not be reached.
    pub fn is_connection_error(&self) -> bool {
        self.status == 0 && self.status_text == "Connection Error"
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum SdkError {
    /// Could not talk to the relay itself.
    #[error("relay unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The relay refused the payload (outer 4xx).
    #[error("relay rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("unexpected relay response ({status}): {body}")]
    Unexpected { status: StatusCode, body: String },
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::builder().no_proxy().build().unwrap_or_default(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check relay liveness.
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.relay_url))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(SdkError::Unexpected { status, body });
        }
        Ok(resp.json().await?)
    }

    /// Relay a request. Remote failures come back as `Ok` with `status == 0`.
    pub async fn proxy(&self, req: &ProxyRequest) -> Result<ProxyResponse, SdkError> {
        self.proxy_raw(serde_json::to_string(req)?).await
    }

    /// Send an arbitrary body to `/api/proxy`.
    pub async fn proxy_raw(&self, body: String) -> Result<ProxyResponse, SdkError> {
        let resp = self
            .client
            .post(format!("{}/api/proxy", self.relay_url))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status.is_client_error() {
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&text) {
                return Err(SdkError::Rejected { status, message: err.error });
            }
        }
        if status != StatusCode::OK {
            return Err(SdkError::Unexpected { status, body: text });
        }

        serde_json::from_str(&text).map_err(|_| SdkError::Unexpected { status, body: text })
    }
}
