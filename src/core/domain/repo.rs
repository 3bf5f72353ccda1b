//! Repository reference type.

use std::str::FromStr;

use crate::error::ValidationError;

/// A repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Create from parts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRepo` unless both parts use only
    /// ASCII letters, digits, `.`, `-` and `_`, and neither is `.` or `..`.
    pub fn new(owner: &str, name: &str) -> Result<Self, ValidationError> {
        if !valid_part(owner) || !valid_part(name) {
            return Err(ValidationError::InvalidRepo(format!("{}/{}", owner, name)));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Short repository name (the part after `/`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

// Both parts end up as URL path segments, so anything outside GitHub's
// name alphabet is rejected rather than encoded.
fn valid_part(part: &str) -> bool {
    !part.is_empty()
        && part != "."
        && part != ".."
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

impl FromStr for RepoRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| ValidationError::InvalidRepo(s.to_string()))?;
        Self::new(owner, name.trim_end_matches(".git"))
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
