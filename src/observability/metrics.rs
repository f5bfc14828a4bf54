//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bff_requests_total` (counter): inbound requests by route, status
//! - `bff_request_duration_seconds` (histogram): inbound latency
//! - `bff_token_refresh_total` (counter): identity exchanges by outcome
//! - `bff_upstream_errors_total` (counter): failures by error kind
//! - `bff_attribute_catalog_size` (gauge): cached attribute names
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
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

/// Record a completed inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!("bff_requests_total", "route" => route, "status" => status.to_string()).increment(1);
    histogram!("bff_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a client-credentials exchange.
pub fn record_token_refresh(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("bff_token_refresh_total", "outcome" => outcome).increment(1);
}

/// Record an upstream failure by kind.
pub fn record_upstream_error(kind: &'static str) {
    counter!("bff_upstream_errors_total", "kind" => kind).increment(1);
}

/// Record the number of cached attribute names.
pub fn record_attribute_catalog_size(size: usize) {
    gauge!("bff_attribute_catalog_size").set(size as f64);
}
