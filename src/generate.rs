// src/generate.rs
use tracing::{error, info};

use crate::client::LlmClient;
use crate::error::GenerateError;
use crate::prompts::{commit_user_prompt, COMMIT_SYSTEM_PROMPT};

/// Ask the provider for a one-line conventional commit title.
///
/// Provider failures are logged and returned, never propagated as a panic;
/// the caller decides how to report "no message".
pub async fn generate_commit_message(client: &LlmClient, diff: &str) -> Result<String, GenerateError> {
    let prompt = commit_user_prompt(diff);

    let response = match client.chat(COMMIT_SYSTEM_PROMPT, &prompt).await {
        Ok(r) => r,
        Err(e) => {
            error!(provider = %client.provider(), model = client.model(), "Error generating commit message: {:#}", e);
            return Err(GenerateError::Provider(format!("{:#}", e)));
        }
    };

    let message = response.trim();
    if message.is_empty() {
        error!(provider = %client.provider(), "provider returned an empty commit message");
        return Err(GenerateError::EmptyResponse);
    }

    info!(provider = %client.provider(), model = client.model(), "generated commit message");
    Ok(message.to_string())
}
