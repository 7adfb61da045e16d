//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): inbound latency by method, route
//! - `gateway_upstream_requests_total` (counter): store calls by operation, outcome
//!
//! Recording without an installed recorder is a no-op, so handlers and tests
//! never need to know whether the exporter is running.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one call to the record store.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "gateway_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    // Label by route template so ids do not explode label cardinality.
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
