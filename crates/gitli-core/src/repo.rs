//! Repository discovery and git settings

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

const GIT_DIR: &str = ".git";

/// Walk up from `start` to the first directory containing `.git`
pub fn find_repository_root(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(GIT_DIR).exists() {
            tracing::debug!(root = %current.display(), "found repository root");
            return Ok(current);
        }
        if !current.pop() {
            return Err(Error::NoRepository);
        }
    }
}

/// Value of a git config key, `None` if unset or git is unavailable
pub fn git_config(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}
