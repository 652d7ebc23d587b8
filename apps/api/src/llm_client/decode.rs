//! Schema-checked decoding of model output.
//!
//! Providers return free text that is supposed to contain JSON. Decoders turn
//! that text into typed payloads or a `DecodeError`; callers treat any error
//! exactly like a failed provider call.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected} items, got {got}")]
    WrongCount { expected: usize, got: usize },

    #[error("field '{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("payload is empty")]
    Empty,
}

/// Strips markdown fences and parses the remainder as `T`.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
