// src/git.rs
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub const TRUNCATION_MARKER: &str = "\n\n[... truncated ...]";

// =============================================================================
// DIFF SOURCE
// =============================================================================

/// Where the staged changes come from.
pub trait DiffSource {
    /// Staged diff as text; empty when nothing is staged.
    fn staged_diff(&self) -> Result<String>;
}

/// Reads the index through the `git` executable.
#[derive(Debug, Default)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `dir` instead of the process working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub fn git_dir(&self) -> Result<PathBuf> {
        let output = self
            .command()
            .args(["rev-parse", "--git-dir"])
            .output()
            .context("Failed to execute git rev-parse")?;
        if !output.status.success() {
            bail!("Could not locate .git directory. Are you in a git repo?");
        }
        let path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        // rev-parse answers relative to the directory it ran in
        Ok(match &self.dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        })
    }
}

impl DiffSource for GitCli {
    fn staged_diff(&self) -> Result<String> {
        let diff = self.run(&["diff", "--cached"])?;
        debug!(bytes = diff.len(), "read staged diff");
        Ok(diff)
    }
}

// =============================================================================
// DIFF SHAPING
// =============================================================================

/// Cap a diff at `max` bytes, cutting at a file boundary when one falls in
/// the second half of the kept text.
pub fn truncate_diff(diff: String, max: usize) -> String {
    if diff.len() <= max {
        return diff;
    }
    let mut end = max;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }
    let mut t = diff[..end].to_string();
    if let Some(p) = t.rfind("\ndiff --git") {
        if p > max / 2 {
            t.truncate(p);
        }
    }
    debug!(from = diff.len(), to = t.len(), "truncated diff");
    t.push_str(TRUNCATION_MARKER);
    t
}

pub fn hooks_dir(git_dir: &Path) -> PathBuf {
    git_dir.join("hooks")
}
