use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use strum::EnumString;

/// Identifies a job accepted by an asynchronous backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: String,
    /// Where the poller checks on the job.
    pub status_url: String,
}

/// Lifecycle state reported by a backend for a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum JobStatus {
    #[strum(serialize = "pending", serialize = "starting", serialize = "queued", serialize = "in_queue")]
    Pending,
    #[strum(serialize = "processing", serialize = "running")]
    Processing,
    #[strum(serialize = "succeeded", serialize = "completed", serialize = "success")]
    Succeeded,
    #[strum(serialize = "failed", serialize = "canceled", serialize = "cancelled", serialize = "error")]
    Failed,
    /// Anything else the backend sends. Treated as still running.
    #[strum(default)]
    Unknown(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        JobStatus::from_str(raw.trim()).unwrap_or_else(|_| JobStatus::Unknown(raw.to_string()))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Unknown(raw) => raw,
        }
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(JobStatus::parse(&raw))
    }
}

/// One status check's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub status: JobStatus,
    pub output: Vec<serde_json::Value>,
    pub error: Option<String>,
}

impl StatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            output: Vec::new(),
            error: None,
        }
    }

    pub fn with_output(mut self, output: Vec<serde_json::Value>) -> Self {
        self.output = output;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Normalize an `output` field that may be an array, a single value, or null.
pub fn output_list(value: Option<serde_json::Value>) -> Vec<serde_json::Value> {
    match value {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::Array(items)) => items,
        Some(single) => vec![single],
    }
}
