//! Vault to provider reconciliation.
//!
//! A sync is always previewed before it is applied. [`plan`] fetches both
//! sides and computes the key lists; [`execute`] sends exactly those lists,
//! so what the user approved is what the server applies.

use tracing::{debug, info};

use crate::core::api::{SyncRequest, VaultApi};
use crate::core::domain::{
    Diff, Direction, MatchType, ProjectMatch, ProviderProject, RepoRef, SecretSet, SyncCounts,
    SyncDiff, SyncOutcome, SyncPreview, SyncTarget,
};
use crate::core::matcher;
use crate::error::{ApiError, Result, SyncError, ValidationError};

/// Collaborators for the reconciliation steps that reach the API.
pub struct ReconcilerDeps<'a> {
    pub api: &'a dyn VaultApi,
    pub token: &'a str,
}

/// Compare the vault set with the provider set.
pub fn compute_sync_diff(vault: &SecretSet, provider: &SecretSet) -> SyncDiff {
    let diff = Diff::compute(vault, provider);
    SyncDiff {
        only_in_vault: diff.added,
        only_in_provider: diff.removed,
        different: diff.changed,
        same: diff.same,
        counts: SyncCounts {
            vault: vault.len(),
            provider: provider.len(),
        },
    }
}

/// Turn a diff into the key lists a sync in `direction` would act on.
///
/// Keys missing from the target are created and differing keys updated.
/// Keys missing from the source are deleted only when pushing with
/// `allow_delete`; otherwise they are left alone.
///
/// # Errors
///
/// Returns `SyncError::DeleteOnPull` if `allow_delete` is set for a pull.
pub fn compute_preview(
    diff: &SyncDiff,
    direction: Direction,
    allow_delete: bool,
) -> std::result::Result<SyncPreview, SyncError> {
    let (only_in_source, only_in_target) = match direction {
        Direction::Push => (&diff.only_in_vault, &diff.only_in_provider),
        Direction::Pull => {
            if allow_delete {
                return Err(SyncError::DeleteOnPull);
            }
            (&diff.only_in_provider, &diff.only_in_vault)
        }
    };

    Ok(SyncPreview {
        to_create: only_in_source.clone(),
        to_update: diff.different.clone(),
        to_delete: if allow_delete {
            only_in_target.clone()
        } else {
            Vec::new()
        },
        to_skip: diff.same.clone(),
    })
}

/// Recommend the opposite direction when the chosen source side is empty
/// but the other side has secrets.
///
/// This is the typical first sync: pushing an empty vault would do nothing
/// useful, and with deletes enabled would wipe the provider.
pub fn detect_first_sync(diff: &SyncDiff, direction: Direction) -> Option<Direction> {
    let (source, target) = match direction {
        Direction::Push => (diff.counts.vault, diff.counts.provider),
        Direction::Pull => (diff.counts.provider, diff.counts.vault),
    };

    if source == 0 && target > 0 {
        Some(direction.reversed())
    } else {
        None
    }
}

/// Pick the provider project for `repo`.
///
/// An explicit `requested` id or name wins. Otherwise the matcher decides,
/// and anything it cannot decide confidently is an error the caller may
/// resolve by asking the user.
///
/// # Errors
///
/// Returns `SyncError::NoConnection` when there are no projects at all,
/// `SyncError::UnknownProject` for an unknown `requested` project,
/// `SyncError::AmbiguousProject` for several partial matches, and
/// `SyncError::NoProjectMatch` otherwise.
pub fn select_project<'a>(
    projects: &'a [ProviderProject],
    provider: &str,
    repo: &RepoRef,
    requested: Option<&str>,
) -> std::result::Result<ProjectMatch<'a>, SyncError> {
    if projects.is_empty() {
        return Err(SyncError::NoConnection {
            provider: provider.to_string(),
        });
    }

    let full_name = repo.full_name();

    if let Some(requested) = requested {
        let requested = requested.trim();
        return projects
            .iter()
            .find(|p| p.id == requested || p.name.eq_ignore_ascii_case(requested))
            .map(|project| ProjectMatch {
                project,
                match_type: MatchType::Selected,
            })
            .ok_or_else(|| SyncError::UnknownProject(requested.to_string()));
    }

    if let Some(found) = matcher::find_match(projects, &full_name) {
        debug!(project = %found.project.id, match_type = %found.match_type, "matched project");
        return Ok(found);
    }

    let candidates = matcher::partial_candidates(projects, &full_name);
    if candidates.len() > 1 {
        return Err(SyncError::AmbiguousProject {
            repo: full_name,
            candidates: candidates.iter().map(|p| p.display_name()).collect(),
        });
    }

    Err(SyncError::NoProjectMatch {
        provider: provider.to_string(),
        repo: full_name,
    })
}

/// Check that `project` exposes `environment`.
///
/// # Errors
///
/// Returns `ValidationError::UnknownProviderEnvironment` listing the
/// environments that do exist.
pub fn check_environment(
    project: &ProviderProject,
    environment: &str,
) -> std::result::Result<(), ValidationError> {
    if project.has_environment(environment) {
        return Ok(());
    }

    Err(ValidationError::UnknownProviderEnvironment {
        environment: environment.to_string(),
        project: project.display_name(),
        available: project.environments.clone(),
    })
}

/// A computed, not yet applied, sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub target: SyncTarget,
    pub direction: Direction,
    pub allow_delete: bool,
    pub diff: SyncDiff,
    pub preview: SyncPreview,
}

impl SyncPlan {
    /// The same comparison previewed in another direction.
    ///
    /// Deletes are dropped when switching to a pull.
    pub fn with_direction(self, direction: Direction) -> Result<Self> {
        let allow_delete = self.allow_delete && direction == Direction::Push;
        let preview = compute_preview(&self.diff, direction, allow_delete)?;
        Ok(Self {
            direction,
            allow_delete,
            preview,
            ..self
        })
    }

    /// Direction recommended instead of the planned one, if any.
    pub fn recommended_direction(&self) -> Option<Direction> {
        detect_first_sync(&self.diff, self.direction)
    }
}

/// Fetch both sides of `target` and preview a sync in `direction`.
///
/// A vault environment that does not exist yet counts as empty.
///
/// # Errors
///
/// Returns `SyncError::DeleteOnPull` for a pull with `allow_delete`, or the
/// API error from either fetch.
pub fn plan(
    deps: &ReconcilerDeps<'_>,
    target: SyncTarget,
    direction: Direction,
    allow_delete: bool,
) -> Result<SyncPlan> {
    if allow_delete && direction == Direction::Pull {
        return Err(SyncError::DeleteOnPull.into());
    }

    let vault = match deps
        .api
        .pull_secrets(deps.token, &target.repo, &target.keyway_environment)
    {
        Ok(secrets) => secrets,
        Err(ApiError::NotFound { .. }) => {
            debug!(
                environment = %target.keyway_environment,
                "vault environment not found, treating as empty"
            );
            SecretSet::new()
        }
        Err(e) => return Err(e.into()),
    };
    let provider = deps.api.provider_secrets(deps.token, &target)?;

    let diff = compute_sync_diff(&vault, &provider);
    let preview = compute_preview(&diff, direction, allow_delete)?;

    debug!(
        vault = diff.counts.vault,
        provider = diff.counts.provider,
        create = preview.to_create.len(),
        update = preview.to_update.len(),
        delete = preview.to_delete.len(),
        "sync planned"
    );

    Ok(SyncPlan {
        target,
        direction,
        allow_delete,
        diff,
        preview,
    })
}

/// Apply a previewed plan once `confirm` approves it.
///
/// # Errors
///
/// Returns the error from `confirm` or from the sync request.
pub fn execute(
    deps: &ReconcilerDeps<'_>,
    plan: &SyncPlan,
    confirm: impl FnOnce(&SyncPlan) -> Result<bool>,
) -> Result<SyncOutcome> {
    if !plan.preview.has_changes() {
        return Ok(SyncOutcome::UpToDate);
    }

    if !confirm(plan)? {
        info!("sync cancelled");
        return Ok(SyncOutcome::Cancelled);
    }

    let request = SyncRequest::new(&plan.target, plan.direction, plan.allow_delete, &plan.preview);
    let summary = deps.api.execute_sync(deps.token, &request)?;

    info!(
        created = summary.created,
        updated = summary.updated,
        deleted = summary.deleted,
        "sync applied"
    );
    Ok(SyncOutcome::Completed(summary))
}
