//! Push and pull merge policies.
//!
//! Both policies default to keeping data: a push never deletes a vault
//! secret and a pull never deletes a local one unless the operator asks
//! for it with `prune` or `force`.

use tracing::debug;

use crate::core::codec;
use crate::core::domain::{Diff, SecretSet};

/// What a push will send, and how it compares to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushPlan {
    /// The full set to send to the vault.
    pub secrets: SecretSet,
    /// Local file (source) against the vault (target).
    pub diff: Diff,
    /// Whether vault-only keys will be deleted.
    pub prune: bool,
}

impl PushPlan {
    /// Vault-only keys: deleted when pruning, otherwise kept as-is.
    pub fn removed(&self) -> &[String] {
        &self.diff.removed
    }

    /// Keys that will actually disappear from the vault.
    pub fn deletions(&self) -> &[String] {
        if self.prune {
            &self.diff.removed[..]
        } else {
            &[]
        }
    }

    /// Whether sending `secrets` would change the vault.
    pub fn has_changes(&self) -> bool {
        !self.diff.added.is_empty() || !self.diff.changed.is_empty() || !self.deletions().is_empty()
    }
}

/// Compute the set to push.
///
/// Without `prune`, the result is `remote` overlaid by `local`. With
/// `prune`, the result is `local` verbatim. Either way, vault-only keys are
/// reported through [`PushPlan::removed`].
pub fn push_merge(local: &SecretSet, remote: &SecretSet, prune: bool) -> PushPlan {
    let diff = Diff::compute(local, remote);

    let secrets = if prune {
        local.clone()
    } else {
        let mut merged = remote.clone();
        merged.overlay(local);
        merged
    };

    debug!(
        added = diff.added.len(),
        changed = diff.changed.len(),
        vault_only = diff.removed.len(),
        prune,
        "push merge computed"
    );

    PushPlan {
        secrets,
        diff,
        prune,
    }
}

/// What a pull will write, and how it compares to the local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullPlan {
    /// Text to write to the local file.
    pub content: String,
    /// Vault (source) against the local file (target).
    pub diff: Diff,
    /// Local-only keys kept in the output. Empty when forcing.
    pub preserved: Vec<String>,
}

/// Compute the file content for a pull.
///
/// With `force`, the output is exactly the serialized `remote` set.
/// Otherwise it is the serialized `remote` set followed by every local-only
/// entry with its local value.
pub fn pull_merge(local: &SecretSet, remote: &SecretSet, force: bool) -> String {
    plan_pull(local, remote, force).content
}

/// Like [`pull_merge`], also returning the diff for previews.
pub fn plan_pull(local: &SecretSet, remote: &SecretSet, force: bool) -> PullPlan {
    let diff = Diff::compute(remote, local);
    let mut content = codec::serialize(remote);

    let preserved = if force {
        Vec::new()
    } else {
        // `removed` is local-only: present in target, absent in source.
        for key in &diff.removed {
            if let Some(value) = local.get(key) {
                codec::push_line(&mut content, key, value);
            }
        }
        diff.removed.clone()
    };

    debug!(
        remote = remote.len(),
        preserved = preserved.len(),
        force,
        "pull merge computed"
    );

    PullPlan {
        content,
        diff,
        preserved,
    }
}
