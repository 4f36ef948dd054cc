//! `data:` URL helpers for inline image payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Text after the comma of a `data:` URL, or `None` for anything else.
pub fn body(text: &str) -> Option<&str> {
    if !text.starts_with("data:") {
        return None;
    }
    text.split_once(',').map(|(_, body)| body)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// MIME type of an encoded image, detected from its magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

pub fn encode_sniffed(bytes: &[u8]) -> Option<String> {
    sniff_mime(bytes).map(|mime| encode(mime, bytes))
}

/// Split a base64 `data:` URL back into MIME type and bytes.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::NotADataUrl)?;
    let (meta, body) = rest.split_once(',').ok_or(DataUrlError::MissingBody)?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;

    let bytes = STANDARD.decode(body.trim()).map_err(DataUrlError::Decode)?;
    Ok((mime.to_string(), bytes))
}

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("Not a data URL")]
    NotADataUrl,

    #[error("Data URL has no body")]
    MissingBody,

    #[error("Only base64 data URLs are supported")]
    NotBase64,

    #[error("Invalid base64 body: {0}")]
    Decode(#[from] base64::DecodeError),
}
