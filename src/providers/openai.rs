// src/providers/openai.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::api_error;
use crate::types::*;

/// One chat completion against an OpenAI-compatible endpoint (OpenAI, Ollama).
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
    let url = format!("{}/chat/completions", base_url);

    let request = ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        max_tokens,
        n: 1,
        temperature,
    };

    let mut req_builder = http
        .post(&url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json");

    if let Some(key) = api_key {
        req_builder = req_builder.header("Authorization", format!("Bearer {}", key));
    }

    debug!(%url, model, "sending chat completion request");
    let response = req_builder
        .json(&request)
        .send()
        .await
        .context("Failed to send request")?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    let resp: ChatCompletionResponse =
        serde_json::from_str(&body).context("Failed to parse response")?;

    resp.choices
        .first()
        .and_then(|c| c.message.content.as_ref())
        .map(|s| s.trim().to_string())
        .context("No response content from API")
}
