// src/cli.rs
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::{ENV_ENDPOINT, ENV_MODEL, ENV_PROVIDER};

#[derive(Parser, Debug)]
#[command(
    name = "prepare-commit-msg-gen",
    version,
    about = "Git prepare-commit-msg hook that writes an AI-generated conventional commit title",
    after_help = "EXAMPLES:
    prepare-commit-msg-gen --install-hook         # Install into .git/hooks
    prepare-commit-msg-gen .git/COMMIT_EDITMSG     # What git runs on commit
    PREPARE_COMMIT_MSG_PROVIDER=ollama git commit  # Use a local model

PROVIDERS:
    openai   (default, needs OPENAI_API_KEY)
    claude   (alias: anthropic, needs ANTHROPIC_API_KEY)
    ollama   (alias: local, no key)"
)]
#[command(group(
    ArgGroup::new("action")
        .args(["install_hook", "uninstall_hook", "show_config"])
        .multiple(false)
))]
pub struct Cli {
    /// Path to the commit message file (passed by git)
    pub commit_msg_file: Option<PathBuf>,

    /// Source of the commit message (passed by git: message, template, merge, squash, commit)
    pub source: Option<String>,

    /// Commit object name when amending (passed by git)
    pub sha: Option<String>,

    /// LLM provider to use
    #[arg(long, env = ENV_PROVIDER)]
    pub provider: Option<String>,

    /// Model name, overriding the provider default
    #[arg(long, env = ENV_MODEL)]
    pub model: Option<String>,

    /// API base URL, overriding the provider default
    #[arg(long, env = ENV_ENDPOINT)]
    pub endpoint: Option<String>,

    /// Install the prepare-commit-msg hook in the current repository
    #[arg(long, conflicts_with = "commit_msg_file")]
    pub install_hook: bool,

    /// Remove the prepare-commit-msg hook installed by this tool
    #[arg(long, conflicts_with = "commit_msg_file")]
    pub uninstall_hook: bool,

    /// Show the resolved provider configuration
    #[arg(long, conflicts_with = "commit_msg_file")]
    pub show_config: bool,
}

// =============================================================================
// HOOK SCRIPTS
// =============================================================================
pub const HOOK_MARKER: &str = "prepare-commit-msg-gen-hook";

pub const HOOK_SCRIPT_UNIX: &str = r#"#!/bin/sh
# prepare-commit-msg-gen-hook: Auto-generated by prepare-commit-msg-gen
# Generates AI commit messages automatically

# Skip if the generator is not installed
if ! command -v prepare-commit-msg-gen >/dev/null 2>&1; then
    exit 0
fi

exec prepare-commit-msg-gen "$@"
"#;

pub const HOOK_SCRIPT_WINDOWS: &str = r#"@echo off
REM prepare-commit-msg-gen-hook: Auto-generated by prepare-commit-msg-gen
REM Generates AI commit messages automatically

where prepare-commit-msg-gen >nul 2>nul
if %errorlevel% neq 0 exit /b 0

prepare-commit-msg-gen %*
"#;

pub const HOOK_SCRIPT: &str = if cfg!(windows) { HOOK_SCRIPT_WINDOWS } else { HOOK_SCRIPT_UNIX };
