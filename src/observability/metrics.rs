//! Metrics collection and exposition.
//!
//! # Metrics
//! - `responder_responses_total` (counter): responses by action and status
//! - `responder_download_bytes_total` (counter): body bytes streamed

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Count a response produced by the responder.
pub fn record_response(action: &'static str, status: u16) {
    counter!(
        "responder_responses_total",
        "action" => action,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_download_bytes(bytes: u64) {
    counter!("responder_download_bytes_total").increment(bytes);
}
