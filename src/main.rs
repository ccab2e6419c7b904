// src/main.rs
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod generate;
mod git;
mod prompts;
mod providers;
mod types;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::{cmd_config, cmd_hook, cmd_prepare, Outcome};
use config::{Config, ResolvedConfig};
use git::GitCli;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout belongs to git; keep diagnostics on stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    if cli.install_hook || cli.uninstall_hook {
        return cmd_hook(&GitCli::new(), cli.install_hook);
    }

    let file_config = Config::load();
    let resolve = || {
        ResolvedConfig::new(
            cli.provider.as_deref(),
            cli.model.as_deref(),
            cli.endpoint.as_deref(),
            &file_config,
            |var| std::env::var(var).ok(),
        )
    };

    if cli.show_config {
        cmd_config(&file_config, &resolve());
        return Ok(());
    }

    debug!(source = ?cli.source, sha = ?cli.sha, "hook invoked");
    let outcome = cmd_prepare(
        cli.commit_msg_file.as_deref(),
        cli.source.as_deref(),
        &GitCli::new(),
        resolve,
    )
    .await?;

    match outcome {
        Outcome::SkippedSource(source) => debug!(%source, "left commit message untouched"),
        Outcome::NothingStaged => debug!("nothing staged, left commit message untouched"),
        Outcome::Written(message) => debug!(%message, "commit message written"),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
