use std::sync::Arc;

use garde::Validate;

use crate::error::StylizeError;
use crate::models::job::{JobHandle, StatusReport};
use crate::models::stylize::StylizeRequest;
use crate::services::backend::{StylizeBackend, Submission};

/// Validates requests and forwards them to the configured backend.
#[derive(Clone)]
pub struct JobClient {
    backend: Arc<dyn StylizeBackend>,
}

impl JobClient {
    pub fn new(backend: Arc<dyn StylizeBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Submit a request. Invalid requests fail before the backend is called.
    pub async fn submit(&self, request: &StylizeRequest) -> Result<Submission, StylizeError> {
        request
            .validate()
            .map_err(|report| StylizeError::Validation(report.to_string().trim().to_string()))?;

        self.backend.submit(request).await
    }

    pub async fn check_status(&self, handle: &JobHandle) -> Result<StatusReport, StylizeError> {
        self.backend.check_status(handle).await
    }
}
