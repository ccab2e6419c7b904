// src/providers/claude.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::api_error;
use crate::types::*;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[allow(clippy::too_many_arguments)]
pub async fn chat(
    http: &Client,
    base_url: &str,
    api_key: Option<&str>,
    model: &str,
    max_tokens: u32,
    temperature: f32,
    system: &str,
    user: &str,
) -> Result<String> {
    let url = format!("{}/messages", base_url);

    let request = ClaudeRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(user)],
        system: system.to_string(),
        max_tokens,
        temperature: Some(temperature),
    };

    let mut req_builder = http
        .post(&url)
        .header("Content-Type", "application/json")
        .header("anthropic-version", ANTHROPIC_VERSION);

    if let Some(key) = api_key {
        req_builder = req_builder.header("x-api-key", key);
    }

    debug!(%url, model, "sending messages request");
    let response = req_builder
        .json(&request)
        .send()
        .await
        .context("Failed to send request")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    let resp: ClaudeResponse =
        serde_json::from_str(&body).context("Failed to parse Claude response")?;

    resp.content
        .iter()
        .find_map(|c| c.text.as_ref())
        .map(|s| s.trim().to_string())
        .context("No response content from Claude API")
}
