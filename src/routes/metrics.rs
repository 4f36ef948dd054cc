use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus scrape endpoint (text exposition format).
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

/// Register descriptions for the stylization metrics.
pub fn describe_metrics() {
    ::metrics::describe_counter!("stylize_requests_total", "Stylize calls received, by backend");
    ::metrics::describe_counter!(
        "stylize_outcomes_total",
        "Stylize calls finished, by result and failure kind"
    );
    ::metrics::describe_histogram!(
        "stylize_duration_seconds",
        "End-to-end latency of a stylize call"
    );
    ::metrics::describe_counter!(
        "stylize_status_checks_total",
        "Status checks issued against asynchronous backends"
    );
}
