// src/commands/config.rs
use std::fmt::Write;

use crate::config::{Config, Provider, ResolvedConfig, ENV_ENDPOINT, ENV_MODEL, ENV_PROVIDER};
use crate::error::ConfigError;

fn mask(key: &str) -> String {
    let end = key.char_indices().nth(8).map(|(i, _)| i).unwrap_or(key.len());
    format!("{}...", &key[..end])
}

/// Human-readable view of what a hook run would use.
pub fn render_config(
    config_path: Option<&str>,
    file: &Config,
    resolved: &Result<ResolvedConfig, ConfigError>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Config file: {}\n", config_path.unwrap_or("(unknown)"));
    let _ = writeln!(
        out,
        "default_provider: {}",
        file.default_provider.as_deref().unwrap_or("(not set)")
    );

    match resolved {
        Ok(r) => {
            let key_env = r.provider.defaults().api_key_env;
            let _ = writeln!(out, "\n[resolved]");
            let _ = writeln!(out, "  provider:       {}", r.provider);
            let _ = writeln!(out, "  model:          {}", r.model);
            let _ = writeln!(out, "  endpoint:       {}", r.base_url);
            let _ = writeln!(
                out,
                "  api_key:        {}",
                match (&r.api_key, key_env) {
                    (Some(k), _) => mask(k),
                    (None, None) => "(not required)".into(),
                    (None, Some(var)) => format!("(env: {})", var),
                }
            );
            let _ = writeln!(out, "  max_tokens:     {}", r.max_tokens);
            let _ = writeln!(out, "  temperature:    {}", r.temperature);
            let _ = writeln!(out, "  max_diff_chars: {}", r.max_diff_chars);
            let _ = writeln!(
                out,
                "  timeout:        {}",
                r.request_timeout
                    .map(|t| format!("{}s", t.as_secs()))
                    .unwrap_or_else(|| "(none)".into())
            );
            if let Some(proxy) = &r.proxy {
                let _ = writeln!(out, "  proxy:          {}", proxy);
            }
        }
        Err(e) => {
            let _ = writeln!(out, "\nerror: {}", e);
        }
    }

    let _ = writeln!(out, "\nProviders:");
    for p in Provider::ALL {
        let d = p.defaults();
        let _ = writeln!(
            out,
            "  {:<7} model={} endpoint={} key={}",
            d.name,
            d.model,
            d.base_url,
            d.api_key_env.unwrap_or("(none)")
        );
    }

    let _ = writeln!(out, "\nOverrides: {} {} {}", ENV_PROVIDER, ENV_MODEL, ENV_ENDPOINT);
    let _ = write!(out, "Priority: CLI args > env var > provider config > defaults");
    out
}

pub fn cmd_config(file: &Config, resolved: &Result<ResolvedConfig, ConfigError>) {
    let path = Config::path().map(|p| p.display().to_string());
    println!("{}", render_config(path.as_deref(), file, resolved));
}
