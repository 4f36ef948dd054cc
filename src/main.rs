use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use stylize_proxy::{
    app_state::AppState,
    config::AppConfig,
    router::build_router,
    routes,
    services::{orchestrator::StylizeOrchestrator, poller::StatusPoller},
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing stylize-proxy server");

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);
    routes::metrics::describe_metrics();

    let backend = config
        .build_backend()
        .expect("Failed to initialize stylization backend");

    let poll_config = config.poll_config();
    tracing::info!(
        backend = backend.name(),
        poll_interval_ms = poll_config.interval.as_millis() as u64,
        poll_timeout_secs = poll_config.timeout.as_secs(),
        poll_max_attempts = ?poll_config.max_attempts,
        "Stylization backend ready"
    );

    let shutdown = CancellationToken::new();
    let orchestrator = StylizeOrchestrator::new(backend, StatusPoller::new(poll_config));
    let state = AppState::new(orchestrator, shutdown.clone());

    let app = build_router(state, config.request_body_limit_bytes).route(
        "/metrics",
        get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

/// Wait for Ctrl-C, then cancel outstanding polls so in-flight requests drain.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, abandoning in-flight stylize calls");
    shutdown.cancel();
}
