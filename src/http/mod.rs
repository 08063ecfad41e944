//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task per connection)
//!     → server.rs (middleware: request ID, trace, CORS headers, timeout)
//!     → routing table
//!         GET  /, /index.html → pages.rs (static page)
//!         GET  /api/health    → pages.rs (health JSON)
//!         POST /api/proxy     → proxy.rs → relay subsystem
//!         OPTIONS *           → pages.rs (204 preflight)
//!         anything else       → 404 {"error":"Not found"}
//!     → response.rs (JSON error shape)
//! ```

pub mod pages;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
