// src/client.rs
use anyhow::Result;
use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::config::{Dialect, Provider, ResolvedConfig};
use crate::error::ConfigError;
use crate::providers::{claude, openai};

/// Chat client bound to one provider, model and endpoint.
pub struct LlmClient {
    http: Client,
    provider: Provider,
    dialect: Dialect,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Option<Duration>,
}

impl LlmClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self, ConfigError> {
        // No timeout unless the config file asks for one.
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = Proxy::all(proxy_url).map_err(|e| ConfigError::HttpClient(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            provider: config.provider,
            dialect: config.provider.defaults().dialect,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.request_timeout,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        match self.dialect {
            Dialect::Anthropic => {
                claude::chat(
                    &self.http,
                    &self.base_url,
                    self.api_key.as_deref(),
                    &self.model,
                    self.max_tokens,
                    self.temperature,
                    system,
                    user,
                )
                .await
            }
            Dialect::OpenAi => {
                openai::chat(
                    &self.http,
                    &self.base_url,
                    self.api_key.as_deref(),
                    &self.model,
                    self.max_tokens,
                    self.temperature,
                    system,
                    user,
                )
                .await
            }
        }
    }
}
