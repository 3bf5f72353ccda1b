//! Provider sync types.

use serde::{Deserialize, Serialize};

use super::RepoRef;

/// Which way secrets flow during a provider sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Vault → provider.
    Push,
    /// Provider → vault.
    Pull,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Push => Direction::Pull,
            Direction::Pull => Direction::Push,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Push => write!(f, "push"),
            Direction::Pull => write!(f, "pull"),
        }
    }
}

/// Key-level comparison between the vault and a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncDiff {
    pub only_in_vault: Vec<String>,
    pub only_in_provider: Vec<String>,
    pub different: Vec<String>,
    pub same: Vec<String>,
    pub counts: SyncCounts,
}

/// Secret counts on each side of a sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncCounts {
    pub vault: usize,
    pub provider: usize,
}

/// The key lists a sync would act on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPreview {
    pub to_create: Vec<String>,
    pub to_update: Vec<String>,
    pub to_delete: Vec<String>,
    pub to_skip: Vec<String>,
}

impl SyncPreview {
    /// Whether applying this preview would change anything.
    pub fn has_changes(&self) -> bool {
        !(self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty())
    }
}

/// Where a sync runs: one vault environment against one provider environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub repo: RepoRef,
    pub connection_id: String,
    pub project_id: String,
    pub keyway_environment: String,
    pub provider_environment: String,
}

/// Counts reported by the server after a sync is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SyncSummary {
    #[serde(default)]
    pub created: usize,
    #[serde(default)]
    pub updated: usize,
    #[serde(default)]
    pub deleted: usize,
}

/// How an apply step ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The operator approved and the changes were applied.
    Completed(SyncSummary),
    /// Nothing to do.
    UpToDate,
    /// The operator declined the preview.
    Cancelled,
}
