use async_trait::async_trait;

use crate::error::StylizeError;
use crate::models::stylize::StylizeRequest;
use crate::services::backend::{StylizeBackend, Submission};
use crate::services::http::read_terminal;

/// Client for a hosted inference endpoint that answers with the encoded
/// image bytes (or a JSON document for models that return URLs).
pub struct InferenceBackend {
    http: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl InferenceBackend {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_token,
        }
    }
}

#[async_trait]
impl StylizeBackend for InferenceBackend {
    fn name(&self) -> &'static str {
        "inference"
    }

    async fn submit(&self, request: &StylizeRequest) -> Result<Submission, StylizeError> {
        let body = serde_json::json!({
            "inputs": {
                "image": request.image.to_text(),
                "styleImage": request.style.to_text(),
            }
        });

        let mut call = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "image/*, application/json")
            .json(&body);
        if let Some(token) = &self.api_token {
            call = call.bearer_auth(token);
        }

        let response = call.send().await?;
        Ok(Submission::Immediate(read_terminal(response).await?))
    }
}
