use std::time::Duration;

use crate::models::stylize::{FailureKind, StylizeOutcome};

/// Errors raised while submitting or polling a stylization job.
///
/// Every variant reaches the caller as a [`StylizeOutcome::Failure`]; see
/// [`StylizeError::into_outcome`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StylizeError {
    /// The caller's request is malformed. Never reaches the network.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The HTTP call itself failed (connect, DNS, TLS, read timeout).
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend rejected request ({status}): {body}")]
    BackendRejected { status: u16, body: String },

    /// The backend answered 2xx but the body is not what we expect.
    #[error("Unexpected backend response: {0}")]
    Protocol(String),

    /// Polling did not reach a terminal state before the deadline.
    #[error("Job did not finish within {elapsed:?} ({attempts} status checks)")]
    Timeout { elapsed: Duration, attempts: u32 },

    /// The backend reported the job as failed.
    #[error("{0}")]
    JobFailed(String),
}

impl StylizeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Transport(_) => FailureKind::Transport,
            Self::BackendRejected { .. } => FailureKind::BackendRejected,
            Self::Protocol(_) => FailureKind::Protocol,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::JobFailed(_) => FailureKind::JobFailed,
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::BackendRejected { status, .. } => *status >= 500,
            Self::Validation(_) | Self::Protocol(_) | Self::JobFailed(_) => false,
        }
    }

    pub fn into_outcome(self) -> StylizeOutcome {
        let retriable = self.is_retriable();
        self.into_outcome_with(retriable)
    }

    /// Same as [`into_outcome`](Self::into_outcome) with an explicit
    /// retriable flag. Used by the poller, where any failed status check is
    /// worth retrying from scratch.
    pub fn into_outcome_with(self, retriable: bool) -> StylizeOutcome {
        StylizeOutcome::Failure {
            kind: self.kind(),
            reason: self.to_string(),
            retriable,
        }
    }
}

impl From<reqwest::Error> for StylizeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
