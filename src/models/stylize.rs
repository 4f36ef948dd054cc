use garde::Validate;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::services::data_url;

/// An image or style reference as handed to a backend.
///
/// Text covers remote URLs, style identifiers, bare base64 and `data:` URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Text(text) => {
                let text = text.trim();
                text.is_empty() || data_url::body(text).is_some_and(|b| b.trim().is_empty())
            }
            Payload::Binary(bytes) => bytes.is_empty(),
        }
    }

    /// Bare base64 content: strips a `data:` prefix, encodes binary.
    pub fn to_base64(&self) -> String {
        match self {
            Payload::Text(text) => data_url::body(text).unwrap_or(text).to_string(),
            Payload::Binary(bytes) => data_url::encode_base64(bytes),
        }
    }

    /// Text passed through unchanged, binary turned into a data URL.
    pub fn to_text(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Binary(bytes) => data_url::encode_sniffed(bytes)
                .unwrap_or_else(|| data_url::encode("application/octet-stream", bytes)),
        }
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Binary(value)
    }
}

fn non_empty_payload(value: &Payload, _ctx: &()) -> garde::Result {
    if value.is_empty() {
        return Err(garde::Error::new("must not be empty"));
    }
    Ok(())
}

/// One stylization request: the content image plus a style reference.
#[derive(Debug, Clone, Validate)]
pub struct StylizeRequest {
    #[garde(custom(non_empty_payload))]
    pub image: Payload,

    #[garde(custom(non_empty_payload))]
    pub style: Payload,
}

impl StylizeRequest {
    pub fn new(image: impl Into<Payload>, style: impl Into<Payload>) -> Self {
        Self {
            image: image.into(),
            style: style.into(),
        }
    }
}

/// Reference to a stylized image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// Remote location of the result.
    Url(String),
    /// `data:` URL carrying the encoded image.
    Inline(String),
}

impl ImageRef {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with("data:") {
            ImageRef::Inline(text)
        } else {
            ImageRef::Url(text)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::Url(s) | ImageRef::Inline(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Transport,
    BackendRejected,
    Protocol,
    Timeout,
    JobFailed,
}

/// Normalized result of one stylize call.
#[derive(Debug, Clone, PartialEq)]
pub enum StylizeOutcome {
    /// `image_ref` is `None` when the backend succeeded without output.
    Success { image_ref: Option<ImageRef> },
    Failure {
        kind: FailureKind,
        reason: String,
        retriable: bool,
    },
}

impl StylizeOutcome {
    pub fn success(image_ref: impl Into<String>) -> Self {
        StylizeOutcome::Success {
            image_ref: Some(ImageRef::from_text(image_ref)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StylizeOutcome::Success { .. })
    }

    pub fn is_retriable(&self) -> bool {
        matches!(self, StylizeOutcome::Failure { retriable: true, .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            StylizeOutcome::Failure { kind, .. } => Some(*kind),
            StylizeOutcome::Success { .. } => None,
        }
    }
}
