// src/providers/mod.rs
pub mod claude;
pub mod openai;

use anyhow::anyhow;
use reqwest::StatusCode;

use crate::types::ApiError;

/// Turn a non-2xx response body into an error, preferring the API's own message.
pub(crate) fn api_error(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(err) = serde_json::from_str::<ApiError>(body) {
        if let Some(msg) = err.error.and_then(|detail| detail.message) {
            return anyhow!("API error ({}): {}", status, msg);
        }
    }
    let end = body
        .char_indices()
        .nth(500)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    anyhow!("API error ({}): {}", status, &body[..end])
}
