//! Backend adapter capability shared by every stylization service.
//!
//! A backend is either asynchronous (submission yields a [`JobHandle`] that
//! is polled through [`StylizeBackend::check_status`]) or synchronous
//! (submission yields the terminal payload directly). Both shapes implement
//! the same trait so the orchestrator never branches on the concrete
//! service.

use async_trait::async_trait;

use crate::error::StylizeError;
use crate::models::job::{JobHandle, StatusReport};
use crate::models::stylize::StylizeRequest;

/// Un-normalized terminal payload, turned into an outcome by the result mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTerminal {
    /// Output list as reported by the backend (URLs, data URLs, file objects).
    Outputs(Vec<serde_json::Value>),
    /// The backend reported the job as failed.
    Failed { detail: Option<String> },
    /// Encoded image returned as the response body.
    Binary {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
}

/// What a backend hands back after accepting a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Job(JobHandle),
    Immediate(RawTerminal),
}

#[async_trait]
pub trait StylizeBackend: Send + Sync {
    /// Short label used in logs, metrics and `/health`.
    fn name(&self) -> &'static str;

    /// Issue the single outbound create/infer call for an already-validated request.
    async fn submit(&self, request: &StylizeRequest) -> Result<Submission, StylizeError>;

    /// Check on a job previously returned from [`submit`](Self::submit).
    ///
    /// Synchronous backends never hand out handles and keep the default.
    async fn check_status(&self, handle: &JobHandle) -> Result<StatusReport, StylizeError> {
        Err(StylizeError::Protocol(format!(
            "{} backend does not support status checks (job {})",
            self.name(),
            handle.id
        )))
    }
}
