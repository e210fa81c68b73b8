//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by status
//! - `router_request_duration_seconds` (histogram): dispatch latency
//! - `router_reloads_total` (counter): reload cycles by outcome
//! - `router_routes` (gauge): entries in the current snapshot
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(status: u16, start: Instant) {
    counter!("router_requests_total", "status" => status.to_string()).increment(1);
    histogram!("router_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one reload cycle.
pub fn record_reload(outcome: &'static str) {
    counter!("router_reloads_total", "outcome" => outcome).increment(1);
}

pub fn set_route_count(routes: usize) {
    gauge!("router_routes").set(routes as f64);
}
