use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: booking requests that created a row.
pub const BOOKINGS_REQUESTED_TOTAL: &str = "lendly_bookings_requested_total";

/// Counter: approve/reject transitions applied. Labels: decision.
pub const BOOKINGS_DECIDED_TOTAL: &str = "lendly_bookings_decided_total";

/// Counter: read operations served. Labels: op.
pub const BOOKING_QUERIES_TOTAL: &str = "lendly_booking_queries_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
