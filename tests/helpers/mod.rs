//! Shared test doubles: a scripted in-memory backend and in-process mock
//! HTTP servers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;

use stylize_proxy::error::StylizeError;
use stylize_proxy::models::job::{JobHandle, JobStatus, StatusReport};
use stylize_proxy::models::stylize::StylizeRequest;
use stylize_proxy::services::backend::{RawTerminal, StylizeBackend, Submission};
use stylize_proxy::services::orchestrator::StylizeOrchestrator;
use stylize_proxy::services::poller::{PollConfig, StatusPoller};

/// In-memory backend whose submit and status answers are scripted.
///
/// Once the status script runs out, every further check reports
/// `processing`.
pub struct ScriptedBackend {
    submission: Result<Submission, StylizeError>,
    statuses: Mutex<VecDeque<Result<StatusReport, StylizeError>>>,
    check_delay: Duration,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn job(statuses: Vec<Result<StatusReport, StylizeError>>) -> Self {
        Self::new(
            Ok(Submission::Job(JobHandle {
                id: "job-1".to_string(),
                status_url: "memory://jobs/job-1".to_string(),
            })),
            statuses,
        )
    }

    pub fn immediate(raw: RawTerminal) -> Self {
        Self::new(Ok(Submission::Immediate(raw)), Vec::new())
    }

    pub fn rejecting(err: StylizeError) -> Self {
        Self::new(Err(err), Vec::new())
    }

    fn new(
        submission: Result<Submission, StylizeError>,
        statuses: Vec<Result<StatusReport, StylizeError>>,
    ) -> Self {
        Self {
            submission,
            statuses: Mutex::new(statuses.into()),
            check_delay: Duration::ZERO,
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    /// Make every status check take `delay` before answering.
    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StylizeBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn submit(&self, _request: &StylizeRequest) -> Result<Submission, StylizeError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submission.clone()
    }

    async fn check_status(&self, _handle: &JobHandle) -> Result<StatusReport, StylizeError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if !self.check_delay.is_zero() {
            tokio::time::sleep(self.check_delay).await;
        }
        let next = self.statuses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(StatusReport::new(JobStatus::Processing)))
    }
}

pub fn status(status: JobStatus) -> Result<StatusReport, StylizeError> {
    Ok(StatusReport::new(status))
}

pub fn succeeded(outputs: &[&str]) -> Result<StatusReport, StylizeError> {
    Ok(StatusReport::new(JobStatus::Succeeded)
        .with_output(outputs.iter().map(|o| serde_json::json!(o)).collect()))
}

pub fn fast_poll(interval_ms: u64, timeout_ms: u64) -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(interval_ms),
        timeout: Duration::from_millis(timeout_ms),
        max_attempts: None,
    }
}

pub fn orchestrator(backend: Arc<ScriptedBackend>, poll: PollConfig) -> StylizeOrchestrator {
    StylizeOrchestrator::new(backend, StatusPoller::new(poll))
}

pub fn valid_request() -> StylizeRequest {
    StylizeRequest::new("data:image/png;base64,iVBORw0KGgo=", "https://styles.example.com/starry-night.jpg")
}

/// Bind a mock server on an ephemeral port and serve the router built from
/// its base URL. Returns the base URL.
pub async fn spawn_server<F>(build: F) -> String
where
    F: FnOnce(String) -> Router,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let app = build(base_url.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base_url
}

/// Request log shared between a mock server and the test body.
#[derive(Default)]
pub struct Recorded {
    pub bodies: Mutex<Vec<serde_json::Value>>,
    pub auth_headers: Mutex<Vec<Option<String>>>,
    pub polls: AtomicUsize,
}

impl Recorded {
    pub fn record(&self, headers: &axum::http::HeaderMap, body: Option<serde_json::Value>) {
        let auth = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        self.auth_headers.lock().unwrap().push(auth);
        if let Some(body) = body {
            self.bodies.lock().unwrap().push(body);
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
