//! Repository to provider project matching.
//!
//! Rules are tried in order and the first hit wins:
//!
//! 1. the project's linked repository is this repository
//! 2. the project name equals the repository name
//! 3. exactly one project name contains, or is contained in, the
//!    repository name
//!
//! Several partial matches yield no match. The caller then asks the user
//! instead of guessing.

use crate::core::domain::{MatchType, ProjectMatch, ProviderProject};

/// Find the project that belongs to `repo_full_name` (`owner/name`).
///
/// All comparisons ignore ASCII case.
pub fn find_match<'a>(
    projects: &'a [ProviderProject],
    repo_full_name: &str,
) -> Option<ProjectMatch<'a>> {
    let full_name = repo_full_name.trim();
    let short_name = short_name(full_name);

    if let Some(project) = projects.iter().find(|p| {
        p.linked_repo
            .as_deref()
            .is_some_and(|linked| linked.trim().eq_ignore_ascii_case(full_name))
    }) {
        return Some(ProjectMatch {
            project,
            match_type: MatchType::LinkedRepo,
        });
    }

    if short_name.is_empty() {
        return None;
    }

    if let Some(project) = projects
        .iter()
        .find(|p| p.name.trim().eq_ignore_ascii_case(short_name))
    {
        return Some(ProjectMatch {
            project,
            match_type: MatchType::ExactName,
        });
    }

    match partial_candidates(projects, repo_full_name).as_slice() {
        [project] => Some(ProjectMatch {
            project: *project,
            match_type: MatchType::PartialName,
        }),
        _ => None,
    }
}

/// Projects whose name overlaps the repository name in either direction.
///
/// Used to offer choices when [`find_match`] finds nothing confident.
pub fn partial_candidates<'a>(
    projects: &'a [ProviderProject],
    repo_full_name: &str,
) -> Vec<&'a ProviderProject> {
    let short_name = short_name(repo_full_name.trim()).to_ascii_lowercase();
    if short_name.is_empty() {
        return Vec::new();
    }

    projects
        .iter()
        .filter(|p| {
            let name = p.name.trim().to_ascii_lowercase();
            !name.is_empty() && (name.contains(&short_name) || short_name.contains(&name))
        })
        .collect()
}

fn short_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name).trim()
}
