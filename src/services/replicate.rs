use async_trait::async_trait;
use serde::Deserialize;

use crate::error::StylizeError;
use crate::models::job::{output_list, JobHandle, JobStatus, StatusReport};
use crate::models::stylize::StylizeRequest;
use crate::services::backend::{RawTerminal, StylizeBackend, Submission};
use crate::services::http::{read_json, value_text};

pub const DEFAULT_ENDPOINT: &str = "https://api.replicate.com/v1/predictions";

/// Style-transfer model version used when none is configured.
pub const DEFAULT_MODEL_VERSION: &str =
    "8e579174a98cd09caca7e7a99fa2aaf4eaef16daf2003a3862c1af05c1c531c8";

/// Client for the Replicate predictions API (create, then poll).
pub struct ReplicateBackend {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
    model_version: String,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: Option<String>,
    status: Option<JobStatus>,
    urls: Option<PredictionUrls>,
    #[serde(default)]
    output: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

impl Prediction {
    fn error_text(&self) -> Option<String> {
        self.error
            .as_ref()
            .filter(|e| !e.is_null())
            .map(value_text)
    }
}

impl ReplicateBackend {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            model_version: model_version.into(),
        }
    }

    fn authorization(&self) -> String {
        format!("Token {}", self.api_token)
    }
}

#[async_trait]
impl StylizeBackend for ReplicateBackend {
    fn name(&self) -> &'static str {
        "replicate"
    }

    async fn submit(&self, request: &StylizeRequest) -> Result<Submission, StylizeError> {
        let body = serde_json::json!({
            "version": self.model_version,
            "input": {
                "content_image": request.image.to_base64(),
                "style_image": request.style.to_text(),
            }
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let prediction: Prediction = read_json(response).await?;

        // Replicate answers synchronously when the prediction finishes fast.
        match prediction.status {
            Some(JobStatus::Succeeded) => {
                return Ok(Submission::Immediate(RawTerminal::Outputs(output_list(
                    prediction.output,
                ))));
            }
            Some(JobStatus::Failed) => {
                let detail = prediction.error_text();
                return Ok(Submission::Immediate(RawTerminal::Failed { detail }));
            }
            _ => {}
        }

        let status_url = prediction
            .urls
            .and_then(|urls| urls.get)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| StylizeError::Protocol("no prediction URL returned".to_string()))?;

        let id = prediction.id.unwrap_or_else(|| status_url.clone());
        tracing::debug!(job_id = %id, status_url = %status_url, "Replicate prediction created");

        Ok(Submission::Job(JobHandle { id, status_url }))
    }

    async fn check_status(&self, handle: &JobHandle) -> Result<StatusReport, StylizeError> {
        let response = self
            .http
            .get(&handle.status_url)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .send()
            .await?;

        let prediction: Prediction = read_json(response).await?;
        let error = prediction.error_text();
        let status = prediction
            .status
            .ok_or_else(|| StylizeError::Protocol("prediction has no status".to_string()))?;

        Ok(StatusReport {
            status,
            output: output_list(prediction.output),
            error,
        })
    }
}
