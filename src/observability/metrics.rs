//! Metrics collection and exposition.
//!
//! # Metrics
//! - `trace_ids_total` (counter): trace identifiers resolved, by origin
//!   (`propagated` or `generated`)
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::trace::TraceOrigin;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_trace_id(origin: TraceOrigin) {
    counter!("trace_ids_total", "origin" => origin.as_str()).increment(1);
}
