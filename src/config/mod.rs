use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::services::backend::StylizeBackend;
use crate::services::http::build_client;
use crate::services::inference::InferenceBackend;
use crate::services::poller::PollConfig;
use crate::services::replicate::{self, ReplicateBackend};
use crate::services::space::SpaceBackend;

/// Which backend family the proxy talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Create-then-poll predictions API.
    Replicate,
    /// Synchronous `{ data: [...] }` space endpoint.
    Space,
    /// Synchronous inference endpoint answering with image bytes.
    Inference,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_backend")]
    pub stylize_backend: BackendKind,

    /// Backend credential.
    #[serde(default)]
    pub backend_api_token: Option<String>,

    /// Used when `BACKEND_API_TOKEN` is unset.
    #[serde(default)]
    pub replicate_api_token: Option<String>,

    /// Create or inference URL. Defaults to the Replicate predictions API.
    #[serde(default)]
    pub backend_endpoint: Option<String>,

    /// Replicate model version id
    #[serde(default = "default_model_version")]
    pub backend_model_version: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    #[serde(default)]
    pub poll_max_attempts: Option<u32>,

    /// Per-call timeout for outbound HTTP requests
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_body_limit")]
    pub request_body_limit_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_backend() -> BackendKind {
    BackendKind::Replicate
}

fn default_model_version() -> String {
    replicate::DEFAULT_MODEL_VERSION.to_string()
}

fn default_poll_interval_ms() -> u64 {
    1500
}

fn default_poll_timeout_secs() -> u64 {
    120
}

fn default_http_timeout_secs() -> u64 {
    60
}

fn default_body_limit() -> usize {
    15 * 1024 * 1024
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.poll_timeout_secs),
            max_attempts: self.poll_max_attempts,
        }
    }

    /// Construct the configured backend adapter with its credentials.
    pub fn build_backend(&self) -> Result<Arc<dyn StylizeBackend>, ConfigError> {
        let http = build_client(Duration::from_secs(self.http_timeout_secs))?;
        let token = self.api_token();

        let backend: Arc<dyn StylizeBackend> = match self.stylize_backend {
            BackendKind::Replicate => {
                let token = token.ok_or(ConfigError::MissingCredential("BACKEND_API_TOKEN"))?;
                let endpoint = self
                    .backend_endpoint
                    .clone()
                    .unwrap_or_else(|| replicate::DEFAULT_ENDPOINT.to_string());
                Arc::new(ReplicateBackend::new(
                    http,
                    endpoint,
                    token,
                    self.backend_model_version.clone(),
                ))
            }
            BackendKind::Space => Arc::new(SpaceBackend::new(http, self.required_endpoint()?, token)),
            BackendKind::Inference => {
                Arc::new(InferenceBackend::new(http, self.required_endpoint()?, token))
            }
        };

        Ok(backend)
    }

    /// First non-blank credential, `BACKEND_API_TOKEN` before `REPLICATE_API_TOKEN`.
    pub fn api_token(&self) -> Option<String> {
        [&self.backend_api_token, &self.replicate_api_token]
            .into_iter()
            .flatten()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn required_endpoint(&self) -> Result<String, ConfigError> {
        self.backend_endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or(ConfigError::MissingEndpoint("BACKEND_ENDPOINT"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("Server misconfigured: missing {0}")]
    MissingCredential(&'static str),

    #[error("Server misconfigured: {0} is required for this backend")]
    MissingEndpoint(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
