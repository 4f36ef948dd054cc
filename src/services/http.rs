//! Response handling shared by the HTTP backend adapters.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::error::StylizeError;
use crate::models::job::output_list;
use crate::services::backend::RawTerminal;

/// Longest backend body kept in a `BackendRejected` error.
const MAX_ERROR_BODY: usize = 2048;

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("stylize-proxy/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

/// Return the response unchanged on 2xx, otherwise a
/// [`StylizeError::BackendRejected`] carrying the status and body text.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StylizeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }

    Err(StylizeError::BackendRejected {
        status: status.as_u16(),
        body,
    })
}

/// Read a successful JSON body. A body that fails to parse is a protocol error.
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StylizeError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| StylizeError::Protocol(format!("invalid JSON body: {e}")))
}

/// Read the terminal answer of a synchronous backend, JSON or raw image.
pub async fn read_terminal(response: reqwest::Response) -> Result<RawTerminal, StylizeError> {
    let response = ensure_success(response).await?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let bytes = response.bytes().await?;

    let is_json = content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json") || ct.ends_with("+json"));

    if is_json {
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| StylizeError::Protocol(format!("invalid JSON body: {e}")))?;
        return terminal_from_json(value);
    }

    Ok(RawTerminal::Binary {
        bytes: bytes.to_vec(),
        content_type,
    })
}

/// Interpret a synchronous JSON answer.
///
/// Accepted shapes: `{ "data": [...] }`, `{ "output": ... }`, a bare array,
/// or `{ "error": "..." }`.
pub fn terminal_from_json(value: serde_json::Value) -> Result<RawTerminal, StylizeError> {
    match value {
        serde_json::Value::Array(items) => Ok(RawTerminal::Outputs(items)),
        serde_json::Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                return Ok(RawTerminal::Outputs(output_list(Some(data))));
            }
            if let Some(output) = map.remove("output") {
                return Ok(RawTerminal::Outputs(output_list(Some(output))));
            }
            if let Some(error) = map.remove("error") {
                return Ok(RawTerminal::Failed {
                    detail: Some(value_text(&error)),
                });
            }
            Err(StylizeError::Protocol(
                "response has neither data, output nor error".to_string(),
            ))
        }
        other => Err(StylizeError::Protocol(format!(
            "unexpected JSON response: {other}"
        ))),
    }
}

pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
