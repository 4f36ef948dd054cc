use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::StylizeError;
use crate::models::stylize::{StylizeOutcome, StylizeRequest};
use crate::services::backend::{StylizeBackend, Submission};
use crate::services::job_client::JobClient;
use crate::services::mapper::map_terminal;
use crate::services::poller::StatusPoller;

/// Runs one stylize call end to end: submit, poll if needed, map.
///
/// Holds no per-request state, so one instance serves concurrent calls.
pub struct StylizeOrchestrator {
    client: JobClient,
    poller: StatusPoller,
}

impl StylizeOrchestrator {
    pub fn new(backend: Arc<dyn StylizeBackend>, poller: StatusPoller) -> Self {
        Self {
            client: JobClient::new(backend),
            poller,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.client.backend_name()
    }

    pub async fn stylize(&self, request: StylizeRequest) -> StylizeOutcome {
        let never = CancellationToken::new();
        self.stylize_with_cancel(request, &never)
            .await
            .unwrap_or_else(|| StylizeError::Transport("stylize call abandoned".to_string()).into_outcome())
    }

    /// Like [`stylize`](Self::stylize), returning `None` if `cancel` fires
    /// before an outcome is produced.
    pub async fn stylize_with_cancel(
        &self,
        request: StylizeRequest,
        cancel: &CancellationToken,
    ) -> Option<StylizeOutcome> {
        let backend = self.client.backend_name();
        let span = tracing::info_span!("stylize", request_id = %Uuid::new_v4(), backend);

        async move {
            let start = Instant::now();
            metrics::counter!("stylize_requests_total", "backend" => backend).increment(1);

            let outcome = self.run(&request, cancel).await;
            let elapsed = start.elapsed();

            match &outcome {
                Some(StylizeOutcome::Success { image_ref }) => {
                    metrics::counter!("stylize_outcomes_total", "result" => "success", "kind" => "none")
                        .increment(1);
                    tracing::info!(
                        duration_ms = elapsed.as_millis() as u64,
                        has_output = image_ref.is_some(),
                        "Stylization complete"
                    );
                }
                Some(StylizeOutcome::Failure { kind, reason, retriable }) => {
                    let label: &'static str = (*kind).into();
                    metrics::counter!("stylize_outcomes_total", "result" => "failure", "kind" => label)
                        .increment(1);
                    tracing::warn!(
                        duration_ms = elapsed.as_millis() as u64,
                        kind = label,
                        retriable,
                        reason = %reason,
                        "Stylization failed"
                    );
                }
                None => {
                    metrics::counter!("stylize_outcomes_total", "result" => "abandoned", "kind" => "none")
                        .increment(1);
                    tracing::info!(duration_ms = elapsed.as_millis() as u64, "Stylization abandoned");
                }
            }
            metrics::histogram!("stylize_duration_seconds", "backend" => backend)
                .record(elapsed.as_secs_f64());

            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &StylizeRequest, cancel: &CancellationToken) -> Option<StylizeOutcome> {
        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            result = self.client.submit(request) => result,
        };

        match submitted {
            Ok(Submission::Immediate(raw)) => Some(map_terminal(raw)),
            Ok(Submission::Job(handle)) => {
                tracing::info!(job_id = %handle.id, "Job accepted, polling for completion");
                self.poller.poll(&self.client, handle, cancel).await
            }
            Err(e) => Some(e.into_outcome()),
        }
    }
}
