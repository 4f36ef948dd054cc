//! Normalizes terminal backend payloads into a [`StylizeOutcome`].

use crate::error::StylizeError;
use crate::models::stylize::{ImageRef, StylizeOutcome};
use crate::services::backend::RawTerminal;
use crate::services::data_url;

pub fn map_terminal(raw: RawTerminal) -> StylizeOutcome {
    match raw {
        RawTerminal::Outputs(outputs) => map_outputs(outputs),
        RawTerminal::Failed { detail } => {
            let reason = match detail {
                Some(detail) if !detail.trim().is_empty() => format!("job failed: {detail}"),
                _ => "job failed".to_string(),
            };
            StylizeError::JobFailed(reason).into_outcome()
        }
        RawTerminal::Binary {
            bytes,
            content_type,
        } => map_binary(&bytes, content_type.as_deref()),
    }
}

fn map_outputs(outputs: Vec<serde_json::Value>) -> StylizeOutcome {
    let Some(first) = outputs.into_iter().next() else {
        return StylizeOutcome::Success { image_ref: None };
    };

    let text = match &first {
        serde_json::Value::String(s) => Some(s.as_str()),
        serde_json::Value::Object(map) => map.get("url").and_then(|u| u.as_str()),
        _ => None,
    };

    match text.map(str::trim) {
        Some(text) if !text.is_empty() => StylizeOutcome::Success {
            image_ref: Some(ImageRef::from_text(text)),
        },
        // A null first element mirrors an empty list.
        _ if first.is_null() => StylizeOutcome::Success { image_ref: None },
        _ => StylizeError::Protocol(format!("unrecognized output element: {first}")).into_outcome(),
    }
}

fn map_binary(bytes: &[u8], content_type: Option<&str>) -> StylizeOutcome {
    if bytes.is_empty() {
        return StylizeError::Protocol("backend returned an empty body".to_string()).into_outcome();
    }

    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .filter(|ct| ct.starts_with("image/"));

    match declared.or_else(|| data_url::sniff_mime(bytes)) {
        Some(mime) => StylizeOutcome::Success {
            image_ref: Some(ImageRef::Inline(data_url::encode(mime, bytes))),
        },
        None => StylizeError::Protocol(format!(
            "response body is not a recognized image ({} bytes, content type {})",
            bytes.len(),
            content_type.unwrap_or("none")
        ))
        .into_outcome(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stylize::FailureKind;
    use serde_json::json;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    #[test]
    fn test_first_output_wins() {
        let outcome = map_terminal(RawTerminal::Outputs(vec![json!("url1"), json!("url2")]));
        assert_eq!(outcome, StylizeOutcome::success("url1"));
    }

    #[test]
    fn test_empty_outputs_is_null_success() {
        let outcome = map_terminal(RawTerminal::Outputs(Vec::new()));
        assert_eq!(outcome, StylizeOutcome::Success { image_ref: None });
    }

    #[test]
    fn test_file_object_output() {
        let outcome = map_terminal(RawTerminal::Outputs(vec![json!({ "url": "https://space/file=out.png" })]));
        assert_eq!(outcome, StylizeOutcome::success("https://space/file=out.png"));
    }

    #[test]
    fn test_non_string_output_is_protocol_failure() {
        let outcome = map_terminal(RawTerminal::Outputs(vec![json!(42)]));
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Protocol));
        assert!(!outcome.is_retriable());
    }

    #[test]
    fn test_failed_is_not_retriable() {
        let outcome = map_terminal(RawTerminal::Failed { detail: None });
        match outcome {
            StylizeOutcome::Failure { kind, reason, retriable } => {
                assert_eq!(kind, FailureKind::JobFailed);
                assert_eq!(reason, "job failed");
                assert!(!retriable);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_binary_uses_declared_image_type() {
        let outcome = map_terminal(RawTerminal::Binary {
            bytes: vec![1, 2, 3],
            content_type: Some("image/jpeg; charset=binary".into()),
        });
        let StylizeOutcome::Success { image_ref: Some(image_ref) } = outcome else {
            panic!("expected an image reference");
        };
        assert!(image_ref.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_binary_sniffs_generic_content_type() {
        let outcome = map_terminal(RawTerminal::Binary {
            bytes: PNG_MAGIC.to_vec(),
            content_type: Some("application/octet-stream".into()),
        });
        let StylizeOutcome::Success { image_ref: Some(ImageRef::Inline(url)) } = outcome else {
            panic!("expected inline image");
        };
        let (mime, bytes) = data_url::decode(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, PNG_MAGIC);
    }

    #[test]
    fn test_unrecognized_binary_is_protocol_failure() {
        let outcome = map_terminal(RawTerminal::Binary {
            bytes: b"not an image".to_vec(),
            content_type: None,
        });
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Protocol));

        let empty = map_terminal(RawTerminal::Binary { bytes: Vec::new(), content_type: None });
        assert_eq!(empty.failure_kind(), Some(FailureKind::Protocol));
    }
}
