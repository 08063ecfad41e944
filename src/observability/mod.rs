//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and relay produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape (only with --metrics-address)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to the trace span of every request
//! - Metrics are cheap (no-ops when no exporter is installed)

pub mod logging;
pub mod metrics;
