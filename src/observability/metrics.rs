//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_http_requests_total` (counter): inbound requests by route, status
//! - `relay_upstream_requests_total` (counter): relayed calls by outcome
//! - `relay_upstream_duration_seconds` (histogram): relayed call latency
//!
//! Without an installed recorder the macros are no-ops, so handlers record
//! unconditionally and the exporter is opt-in.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(route: &'static str, status: u16) {
    counter!(
        "relay_http_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record one relayed call and its latency.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    counter!("relay_upstream_requests_total", "outcome" => outcome).increment(1);
    histogram!("relay_upstream_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
