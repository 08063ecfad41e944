//! Inbound payload validation and outbound request construction.
//!
//! # Responsibilities
//! - Parse the JSON payload and validate the url
//! - Reject malformed payloads (bad JSON, missing url, non-http scheme)
//! - Turn the remaining fields into a typed method, URL and header map
//!
//! `method`, `headers` and `body` are typed only when the outbound request
//! is built. A wrong type there is a relay failure, not a bad payload.
//!
//! # Header merge
//! The default `User-Agent` is inserted first, then each payload header is
//! *inserted* (not appended). A payload header with the same name, compared
//! case-insensitively, replaces the earlier value. Only one value per header
//! name is ever sent.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

use crate::relay::error::{Rejection, RelayError};
use crate::relay::types::ProxyRequest;

/// A payload whose url passed validation. The other fields are still raw.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub url: String,
    pub method: Value,
    pub headers: Value,
    pub body: Value,
}

/// Parse and validate the raw `/api/proxy` body.
pub fn parse_request(raw: &[u8]) -> Result<ValidatedRequest, Rejection> {
    let value: Value = serde_json::from_slice(raw).map_err(|_| Rejection::InvalidJson)?;
    if !value.is_object() {
        return Err(Rejection::InvalidJson);
    }
    let payload: ProxyRequest = serde_json::from_value(value).map_err(|_| Rejection::InvalidJson)?;

    let url = payload.url.as_deref().unwrap_or_default().trim();
    if url.is_empty() {
        return Err(Rejection::MissingUrl);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Rejection::UnsupportedScheme);
    }

    Ok(ValidatedRequest {
        url: url.to_string(),
        method: payload.method,
        headers: payload.headers,
        body: payload.body,
    })
}

/// A fully typed request ready to hand to the HTTP client.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Convert a validated payload, failing on values HTTP cannot carry.
    pub fn build(req: &ValidatedRequest, user_agent: &str) -> Result<Self, RelayError> {
        let method = method_name(&req.method)?;
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| RelayError::InvalidMethod(method.clone()))?;
        let url = Url::parse(&req.url)?;
        let headers = merge_headers(user_agent, &header_fields(&req.headers)?)?;

        Ok(Self {
            method,
            url,
            headers,
            body: body_text(&req.body)?,
        })
    }
}

/// Uppercased method; `GET` when absent, null or blank.
fn method_name(value: &Value) -> Result<String, RelayError> {
    match value {
        Value::Null => Ok(Method::GET.to_string()),
        Value::String(m) if m.trim().is_empty() => Ok(Method::GET.to_string()),
        Value::String(m) => Ok(m.trim().to_uppercase()),
        _ => Err(RelayError::InvalidField { field: "method", expected: "a string" }),
    }
}

/// Header object as name/value strings. Numbers and booleans are stringified.
fn header_fields(value: &Value) -> Result<BTreeMap<String, String>, RelayError> {
    const EXPECTED: RelayError = RelayError::InvalidField {
        field: "headers",
        expected: "an object of string values",
    };

    let fields = match value {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(fields) => fields,
        _ => return Err(EXPECTED),
    };

    fields
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(EXPECTED),
            };
            Ok((name.clone(), value))
        })
        .collect()
}

/// Body text, `None` when absent, null or empty.
fn body_text(value: &Value) -> Result<Option<String>, RelayError> {
    match value {
        Value::Null => Ok(None),
        Value::String(b) if b.is_empty() => Ok(None),
        Value::String(b) => Ok(Some(b.clone())),
        _ => Err(RelayError::InvalidField { field: "body", expected: "a string" }),
    }
}

/// Default `User-Agent` first, then payload headers; later names win.
pub fn merge_headers(
    user_agent: &str,
    extra: &BTreeMap<String, String>,
) -> Result<HeaderMap, RelayError> {
    let mut headers = HeaderMap::with_capacity(extra.len() + 1);
    let ua = HeaderValue::from_str(user_agent)
        .map_err(|_| RelayError::InvalidHeaderValue(USER_AGENT.to_string()))?;
    headers.insert(USER_AGENT, ua);

    for (name, value) in extra {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RelayError::InvalidHeaderName(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| RelayError::InvalidHeaderValue(name.clone()))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
