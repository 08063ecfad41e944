//! Failure kinds for the relay.
//!
//! Two families, kept apart because callers treat them differently:
//! [`Rejection`] is a malformed request and is answered with an outer 4xx,
//! [`RelayError`] means the relay ran and is answered with outer 200 and a
//! status-0 [`ProxyResponse`].

use std::error::Error as StdError;
use thiserror::Error;

use crate::relay::types::{ProxyResponse, CONNECTION_ERROR, GENERIC_ERROR};

/// The inbound request could not be turned into an outbound one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid JSON payload")]
    InvalidJson,

    #[error("url is required")]
    MissingUrl,

    #[error("Only http/https URLs are supported")]
    UnsupportedScheme,
}

/// The relayed call failed before a usable HTTP response was obtained.
#[derive(Debug, Error)]
pub enum RelayError {
    /// DNS, connect, TLS, reset or timeout: nothing came back.
    #[error("{0}")]
    Transport(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    /// A payload field other than `url` held the wrong JSON type.
    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Anything else the client reported (redirect loops, builder errors).
    #[error("{0}")]
    Client(String),
}

impl RelayError {
    /// Classify a client error into transport or generic failure.
    pub fn from_client(err: reqwest::Error) -> Self {
        let reason = error_chain(&err);
        if err.is_timeout() || err.is_connect() || err.is_request() {
            RelayError::Transport(reason)
        } else {
            RelayError::Client(reason)
        }
    }

    /// `statusText` label reported for this failure.
    pub fn status_text(&self) -> &'static str {
        match self {
            RelayError::Transport(_) => CONNECTION_ERROR,
            _ => GENERIC_ERROR,
        }
    }

    /// Short label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::Transport(_) => "connection_error",
            _ => "error",
        }
    }
}

impl From<RelayError> for ProxyResponse {
    fn from(err: RelayError) -> Self {
        ProxyResponse::failure(err.status_text(), err.to_string())
    }
}

/// Render an error together with every `source()` below it.
///
/// Client errors wrap the interesting part (e.g. "Connection refused")
/// several levels down; the top-level message alone rarely says why.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
