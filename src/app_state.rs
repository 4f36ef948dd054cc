use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::services::orchestrator::StylizeOrchestrator;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<StylizeOrchestrator>,
    /// Cancelled on shutdown. Each request polls under a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(orchestrator: StylizeOrchestrator, shutdown: CancellationToken) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            shutdown,
        }
    }
}
