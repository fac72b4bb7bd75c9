//! Metrics collection and exposition.
//!
//! # Metrics
//! - `contacts_http_requests_total` (counter): requests by method, route, status
//! - `contacts_http_request_duration_seconds` (histogram): latency by method, route
//! - `contacts_storage_writes_total` (counter): collection saves by outcome
//! - `contacts_total` (gauge): collection size after the last successful save

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("contacts_http_requests_total", "Total HTTP requests handled");
    describe_histogram!(
        "contacts_http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    describe_counter!("contacts_storage_writes_total", "Contact collection saves");
    describe_gauge!("contacts_total", "Contacts in the stored collection");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "contacts_http_requests_total",
        "method" => method.to_owned(),
        "route" => route.to_owned(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "contacts_http_request_duration_seconds",
        "method" => method.to_owned(),
        "route" => route.to_owned()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_storage_write(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("contacts_storage_writes_total", "outcome" => outcome).increment(1);
}

pub fn set_contacts_total(count: usize) {
    gauge!("contacts_total").set(count as f64);
}
