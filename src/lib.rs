//! Local HTTP relay library.
//!
//! Serves a single-page API explorer and relays JSON-described HTTP requests
//! to arbitrary remote origins, returning every outcome in one JSON shape.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{ProxyRequest, ProxyResponse};
