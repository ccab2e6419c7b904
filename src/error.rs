// src/error.rs
use thiserror::Error;

/// Errors raised while resolving which provider to talk to.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unsupported provider: {0} (expected one of: openai, claude, ollama)")]
    UnsupportedProvider(String),

    #[error("Missing API key for {provider}. Set {env_var} or add api_key to the config file")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Why the generator produced no message.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Full cause chain of the failed request.
    #[error("Provider request failed: {0}")]
    Provider(String),

    #[error("Provider returned an empty message")]
    EmptyResponse,
}
