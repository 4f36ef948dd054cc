use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::routes;

/// Build the API router. `/metrics` is attached by the binary, which owns
/// the Prometheus recorder.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/stylize", post(routes::stylize::stylize))
        // Path used by the bundled browser page
        .route("/api/apply-style", post(routes::stylize::stylize))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
}
