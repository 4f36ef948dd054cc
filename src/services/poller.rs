//! Status polling for asynchronous backends.
//!
//! [`StatusPoller::poll`] checks a job at a fixed interval until it reaches
//! a terminal state, the deadline passes, the attempt cap is hit, or the
//! caller cancels. Checks for one handle never overlap.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::StylizeError;
use crate::models::job::{JobHandle, JobStatus};
use crate::models::stylize::StylizeOutcome;
use crate::services::backend::RawTerminal;
use crate::services::job_client::JobClient;
use crate::services::mapper::map_terminal;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between the end of one check and the start of the next.
    pub interval: Duration,
    /// Upper bound on total poll time, measured from the first check.
    pub timeout: Duration,
    /// Optional cap on the number of status checks.
    pub max_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusPoller {
    config: PollConfig,
}

impl StatusPoller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll `handle` to completion.
    ///
    /// Returns `None` when `cancel` fires: the job is abandoned and no
    /// further status checks are issued.
    pub async fn poll(
        &self,
        client: &JobClient,
        handle: JobHandle,
        cancel: &CancellationToken,
    ) -> Option<StylizeOutcome> {
        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let mut attempts = 0u32;

        loop {
            if cancel.is_cancelled() {
                tracing::info!(job_id = %handle.id, attempts, "Polling cancelled");
                return None;
            }

            attempts += 1;
            metrics::counter!("stylize_status_checks_total", "backend" => client.backend_name())
                .increment(1);

            let checked = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %handle.id, attempts, "Polling cancelled during status check");
                    return None;
                }
                result = tokio::time::timeout_at(deadline, client.check_status(&handle)) => result,
            };

            let report = match checked {
                Err(_) => return Some(timed_out(&handle, started, attempts)),
                Ok(Err(e)) => {
                    tracing::warn!(job_id = %handle.id, attempt = attempts, error = %e, "Status check failed");
                    let retriable = matches!(
                        e,
                        StylizeError::Transport(_) | StylizeError::BackendRejected { .. }
                    ) || e.is_retriable();
                    return Some(e.into_outcome_with(retriable));
                }
                Ok(Ok(report)) => report,
            };

            match report.status {
                JobStatus::Succeeded => {
                    tracing::info!(job_id = %handle.id, attempts, "Job succeeded");
                    return Some(map_terminal(RawTerminal::Outputs(report.output)));
                }
                JobStatus::Failed => {
                    tracing::warn!(job_id = %handle.id, attempts, error = ?report.error, "Job failed");
                    return Some(map_terminal(RawTerminal::Failed {
                        detail: report.error,
                    }));
                }
                JobStatus::Unknown(ref raw) => {
                    tracing::debug!(job_id = %handle.id, attempt = attempts, status = %raw, "Unrecognized job status, still polling");
                }
                ref status => {
                    tracing::debug!(job_id = %handle.id, attempt = attempts, status = status.as_str(), "Job still running");
                }
            }

            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                return Some(timed_out(&handle, started, attempts));
            }

            let next_check = Instant::now() + self.config.interval;
            if next_check >= deadline {
                return Some(timed_out(&handle, started, attempts));
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %handle.id, attempts, "Polling cancelled while waiting");
                    return None;
                }
                _ = tokio::time::sleep_until(next_check) => {}
            }
        }
    }
}

fn timed_out(handle: &JobHandle, started: Instant, attempts: u32) -> StylizeOutcome {
    let elapsed = started.elapsed();
    tracing::warn!(
        job_id = %handle.id,
        attempts,
        elapsed_ms = elapsed.as_millis() as u64,
        "Job did not reach a terminal state before the deadline"
    );
    StylizeError::Timeout { elapsed, attempts }.into_outcome()
}
