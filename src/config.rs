// src/config.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ConfigError;

// =============================================================================
// PROVIDER CONSTANTS
// =============================================================================
pub const PROVIDER_OPENAI: &str = "https://api.openai.com/v1";
pub const PROVIDER_CLAUDE: &str = "https://api.anthropic.com/v1";
pub const PROVIDER_OLLAMA: &str = "http://localhost:11434/v1";

pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_DIFF_CHARS: usize = 100_000;

pub const ENV_PROVIDER: &str = "PREPARE_COMMIT_MSG_PROVIDER";
pub const ENV_MODEL: &str = "PREPARE_COMMIT_MSG_MODEL";
pub const ENV_ENDPOINT: &str = "PREPARE_COMMIT_MSG_ENDPOINT";
pub const ENV_PROXY: &str = "PREPARE_COMMIT_MSG_PROXY";

/// Request/response shape a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `POST {base}/chat/completions`, bearer auth.
    OpenAi,
    /// `POST {base}/messages`, `x-api-key` auth.
    Anthropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAi,
    Claude,
}

pub struct ProviderDefaults {
    pub name: &'static str,
    pub model: &'static str,
    pub base_url: &'static str,
    /// `None` for providers that run without credentials.
    pub api_key_env: Option<&'static str>,
    pub dialect: Dialect,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Claude, Provider::Ollama];

    pub fn defaults(self) -> ProviderDefaults {
        match self {
            Provider::Ollama => ProviderDefaults {
                name: "ollama",
                model: "llama3.2:latest",
                base_url: PROVIDER_OLLAMA,
                api_key_env: None,
                dialect: Dialect::OpenAi,
            },
            Provider::OpenAi => ProviderDefaults {
                name: "openai",
                model: "gpt-4o",
                base_url: PROVIDER_OPENAI,
                api_key_env: Some("OPENAI_API_KEY"),
                dialect: Dialect::OpenAi,
            },
            Provider::Claude => ProviderDefaults {
                name: "claude",
                model: "claude-sonnet-4-5-20250929",
                base_url: PROVIDER_CLAUDE,
                api_key_env: Some("ANTHROPIC_API_KEY"),
                dialect: Dialect::Anthropic,
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.defaults().name
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "ollama" | "local" => Ok(Provider::Ollama),
            _ => Err(ConfigError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CONFIG FILE
// =============================================================================
pub const CONFIG_FILENAME: &str = ".prepare-commit-msg.toml";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_provider: Option<String>,
    pub max_diff_chars: Option<usize>,
    /// Unset means the HTTP client never times out.
    pub request_timeout_secs: Option<u64>,
    pub openai: Option<ProviderConfig>,
    pub claude: Option<ProviderConfig>,
    pub ollama: Option<ProviderConfig>,
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_FILENAME))
    }

    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// A missing or unreadable file yields the empty config.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            debug!(path = %path.display(), "no config file");
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }

    pub fn get_provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        match provider {
            Provider::OpenAi => self.openai.as_ref(),
            Provider::Claude => self.claude.as_ref(),
            Provider::Ollama => self.ollama.as_ref(),
        }
    }
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub base_url: String,
    pub max_diff_chars: usize,
    pub request_timeout: Option<Duration>,
    pub proxy: Option<String>,
}

impl ResolvedConfig {
    /// Merge CLI/env overrides, the config file and provider defaults.
    ///
    /// `env_lookup` resolves API key variables; production passes
    /// `std::env::var`. Fails before any network activity when the provider
    /// is unknown or a cloud provider has no key.
    pub fn new(
        cli_provider: Option<&str>,
        cli_model: Option<&str>,
        cli_base_url: Option<&str>,
        file: &Config,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // Provider: CLI/env > config default > "openai"
        let provider = match non_empty(cli_provider).or(non_empty(file.default_provider.as_deref())) {
            Some(name) => name.parse::<Provider>()?,
            None => Provider::OpenAi,
        };
        let defaults = provider.defaults();
        let provider_config = file.get_provider(provider);

        // Base URL: CLI/env > provider config > provider default
        let base_url = non_empty(cli_base_url)
            .map(str::to_string)
            .or_else(|| provider_config.and_then(|p| p.base_url.clone()))
            .unwrap_or_else(|| defaults.base_url.to_string());

        // API key: env var > provider config
        let api_key = defaults
            .api_key_env
            .and_then(|var| env_lookup(var))
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                provider_config
                    .and_then(|p| p.api_key.clone())
                    .filter(|k| !k.trim().is_empty())
            });

        if let Some(env_var) = defaults.api_key_env {
            if api_key.is_none() {
                return Err(ConfigError::MissingApiKey {
                    provider: defaults.name,
                    env_var,
                });
            }
        }

        // Model: CLI/env > provider config > provider default
        let model = non_empty(cli_model)
            .map(str::to_string)
            .or_else(|| provider_config.and_then(|p| p.model.clone()))
            .unwrap_or_else(|| defaults.model.to_string());

        let max_tokens = provider_config
            .and_then(|p| p.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let temperature = provider_config
            .and_then(|p| p.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_diff_chars = file.max_diff_chars.unwrap_or(DEFAULT_MAX_DIFF_CHARS);
        let request_timeout = file.request_timeout_secs.map(Duration::from_secs);
        let proxy = env_lookup(ENV_PROXY)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        debug!(%provider, %model, %base_url, "resolved provider config");

        Ok(Self {
            provider,
            api_key,
            model,
            max_tokens,
            temperature,
            base_url,
            max_diff_chars,
            request_timeout,
            proxy,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
