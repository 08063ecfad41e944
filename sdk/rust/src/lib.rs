//! Async client for the api-relay HTTP API.

pub mod client;

pub use client::{HealthStatus, ProxyRequest, ProxyResponse, RelayClient, SdkError};
