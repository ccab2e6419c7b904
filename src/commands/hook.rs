// src/commands/hook.rs
use anyhow::{bail, Context, Result};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::{HOOK_MARKER, HOOK_SCRIPT};
use crate::git::{hooks_dir, GitCli};

pub const HOOK_NAME: &str = "prepare-commit-msg";

#[derive(Debug, PartialEq, Eq)]
pub enum HookChange {
    Installed(PathBuf),
    AlreadyInstalled(PathBuf),
    Removed(PathBuf),
    NotInstalled,
    Foreign(PathBuf),
}

pub fn install_hook(hooks: &Path) -> Result<HookChange> {
    let hook_path = hooks.join(HOOK_NAME);

    if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path).unwrap_or_default();
        if existing.contains(HOOK_MARKER) {
            return Ok(HookChange::AlreadyInstalled(hook_path));
        }
        bail!(
            "A prepare-commit-msg hook already exists at {:?}. Please back it up or delete it first.",
            hook_path
        );
    }

    fs::create_dir_all(hooks).with_context(|| format!("Failed to create {:?}", hooks))?;
    fs::write(&hook_path, HOOK_SCRIPT)?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    debug!(path = %hook_path.display(), "hook written");
    Ok(HookChange::Installed(hook_path))
}

pub fn uninstall_hook(hooks: &Path) -> Result<HookChange> {
    let hook_path = hooks.join(HOOK_NAME);

    if !hook_path.exists() {
        return Ok(HookChange::NotInstalled);
    }

    let content = fs::read_to_string(&hook_path)?;
    if !content.contains(HOOK_MARKER) {
        return Ok(HookChange::Foreign(hook_path));
    }

    fs::remove_file(&hook_path)?;
    Ok(HookChange::Removed(hook_path))
}

pub fn cmd_hook(git: &GitCli, install: bool) -> Result<()> {
    let hooks = hooks_dir(&git.git_dir()?);

    let change = if install {
        install_hook(&hooks)?
    } else {
        uninstall_hook(&hooks)?
    };

    println!("{}", describe(&change));
    Ok(())
}

fn describe(change: &HookChange) -> String {
    match change {
        HookChange::Installed(path) => format!("Hook installed at {}", path.display()),
        HookChange::AlreadyInstalled(path) => format!("Hook is already installed at {}", path.display()),
        HookChange::Removed(path) => format!("Hook removed from {}", path.display()),
        HookChange::NotInstalled => "No hook found to uninstall.".to_string(),
        HookChange::Foreign(path) => format!(
            "The hook at {} was not created by prepare-commit-msg-gen. Manual removal required.",
            path.display()
        ),
    }
}
