use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub shutting_down: bool,
}

/// GET /health: liveness plus the configured backend family.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let shutting_down = state.shutdown.is_cancelled();

    Json(HealthResponse {
        status: if shutting_down { "draining" } else { "ok" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.orchestrator.backend_name().to_string(),
        shutting_down,
    })
}
