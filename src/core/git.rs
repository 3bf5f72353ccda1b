//! Repository detection from the git `origin` remote.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::domain::RepoRef;
use crate::error::{ConfigError, Result, ValidationError};

/// Detect `owner/name` from the `origin` remote of the repository at `dir`.
///
/// # Errors
///
/// Returns `ConfigError::GitNotFound` if git is not installed,
/// `ConfigError::NoRemote` if there is no `origin`, or
/// `ValidationError::InvalidRepo` if the remote is not a GitHub URL.
pub fn detect_repo(dir: &Path) -> Result<RepoRef> {
    let git = which::which("git").map_err(|_| ConfigError::GitNotFound)?;

    let output = Command::new(git)
        .args(["remote", "get-url", "origin"])
        .current_dir(dir)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(ConfigError::NoRemote.into());
    }

    let url = String::from_utf8_lossy(&output.stdout);
    let repo = parse_remote_url(url.trim())?;
    debug!(repo = %repo, "detected repository");
    Ok(repo)
}

/// Parse a GitHub remote URL into `owner/name`.
///
/// Accepts `https://github.com/owner/name`, `git@github.com:owner/name` and
/// `ssh://git@github.com/owner/name`, each with or without `.git`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRepo` for any other form.
pub fn parse_remote_url(url: &str) -> std::result::Result<RepoRef, ValidationError> {
    let invalid = || ValidationError::InvalidRepo(url.to_string());

    let path = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("ssh://git@github.com/"))
        .or_else(|| url.strip_prefix("https://github.com/"))
        .or_else(|| url.strip_prefix("http://github.com/"))
        .ok_or_else(invalid)?;

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    match path.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] => RepoRef::new(owner, name).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
