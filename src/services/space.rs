use async_trait::async_trait;

use crate::error::StylizeError;
use crate::models::stylize::StylizeRequest;
use crate::services::backend::{StylizeBackend, Submission};
use crate::services::http::read_terminal;

/// Client for a hosted Gradio-style space exposing a synchronous predict route.
///
/// Sends `{ "data": [image, style] }` and expects `{ "data": [output] }`.
pub struct SpaceBackend {
    http: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl SpaceBackend {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_token,
        }
    }
}

#[async_trait]
impl StylizeBackend for SpaceBackend {
    fn name(&self) -> &'static str {
        "space"
    }

    async fn submit(&self, request: &StylizeRequest) -> Result<Submission, StylizeError> {
        let body = serde_json::json!({
            "data": [request.image.to_text(), request.style.to_text()]
        });

        let mut call = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            call = call.bearer_auth(token);
        }

        let response = call.send().await?;
        Ok(Submission::Immediate(read_terminal(response).await?))
    }
}
