use serde::{Deserialize, Serialize};

use crate::models::stylize::{FailureKind, ImageRef};

/// Body of `POST /api/stylize`.
///
/// The bundled browser page posts `content` instead of `image`.
#[derive(Debug, Deserialize)]
pub struct StylizeBody {
    #[serde(default, alias = "content")]
    pub image: Option<String>,

    #[serde(default)]
    pub style: Option<String>,
}

/// Successful response. `output` is null when the backend returned nothing.
#[derive(Debug, Serialize)]
pub struct StylizeResponse {
    pub output: Option<ImageRef>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    pub retriable: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: None,
            retriable: false,
        }
    }
}
