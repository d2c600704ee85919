//! Request and response counters.
//!
//! Handlers call [`record_request`] once when a request arrives and
//! [`record_response`] once with the final status. Counters go through the
//! `metrics` facade and are exported by the Prometheus listener installed in
//! [`install_exporter`]; without an installed recorder they are no-ops.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUEST_TOTAL: &str = "app_url_shortener_request_total";
pub const RESPONSE_TOTAL: &str = "app_url_shortener_response_total";

/// Inbound operation a counter sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Create,
    Redirect,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Create => "create",
            EventType::Redirect => "redirect",
        }
    }
}

pub fn record_request(event: EventType) {
    ::metrics::counter!(REQUEST_TOTAL, "request_type" => event.as_str()).increment(1);
}

pub fn record_response(event: EventType, status: StatusCode) {
    ::metrics::counter!(
        RESPONSE_TOTAL,
        "request_type" => event.as_str(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

/// Installs the global Prometheus recorder and serves `/metrics` on `addr`.
///
/// # Errors
///
/// Returns an error if a recorder is already installed or the listener
/// cannot be set up.
pub fn install_exporter(addr: SocketAddr) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    ::metrics::describe_counter!(REQUEST_TOTAL, "Cumulative inbound requests by type.");
    ::metrics::describe_counter!(
        RESPONSE_TOTAL,
        "Cumulative responses by request type and status."
    );

    tracing::info!("Metrics exporter listening on http://{addr}/metrics");
    Ok(())
}
