//! Provider project types.

use serde::{Deserialize, Serialize};

/// A deployment project on a third-party provider.
///
/// Read-only view fetched from the provider integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub linked_repo: Option<String>,
    #[serde(default)]
    pub environments: Vec<String>,
    pub connection_id: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl ProviderProject {
    /// Name shown to users: `team/name` when a team is known.
    pub fn display_name(&self) -> String {
        let base = match &self.service_name {
            Some(service) => format!("{} ({})", self.name, service),
            None => self.name.clone(),
        };
        match &self.team_name {
            Some(team) => format!("{}/{}", team, base),
            None => base,
        }
    }

    /// Whether the project exposes the given environment.
    ///
    /// Projects that report no environments accept any name.
    pub fn has_environment(&self, environment: &str) -> bool {
        self.environments.is_empty()
            || self
                .environments
                .iter()
                .any(|e| e.eq_ignore_ascii_case(environment))
    }
}

/// How a project was matched to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// The project's linked repository is this repository.
    LinkedRepo,
    /// The project name equals the repository name.
    ExactName,
    /// The only project whose name overlaps the repository name.
    PartialName,
    /// Chosen explicitly by the user.
    Selected,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MatchType::LinkedRepo => "linked repository",
            MatchType::ExactName => "exact name",
            MatchType::PartialName => "partial name",
            MatchType::Selected => "selected",
        };
        write!(f, "{}", label)
    }
}

/// A matched project and the rule that matched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch<'a> {
    pub project: &'a ProviderProject,
    pub match_type: MatchType,
}
