//! Vault API contract.
//!
//! The traits here are what the rest of keyway needs from the remote vault
//! service. [`HttpClient`] is the real implementation; tests substitute
//! their own.

mod http;

use serde::Serialize;

use crate::core::domain::{
    DevicePoll, DeviceSession, Direction, ProviderProject, RepoRef, SecretSet, SyncPreview,
    SyncSummary, SyncTarget, TokenInfo,
};
use crate::error::ApiError;

pub use http::HttpClient;

/// Unauthenticated endpoints used to obtain a token.
pub trait AuthApi {
    /// Start a device authorization.
    fn start_device_login(&self) -> Result<DeviceSession, ApiError>;

    /// Poll a device authorization once.
    fn poll_device_login(&self, device_code: &str) -> Result<DevicePoll, ApiError>;

    /// Validate a personal access token.
    fn validate_token(&self, token: &str) -> Result<TokenInfo, ApiError>;
}

/// Authenticated vault and provider endpoints.
pub trait VaultApi {
    /// Fetch the secrets of one vault environment.
    fn pull_secrets(&self, token: &str, repo: &RepoRef, environment: &str)
        -> Result<SecretSet, ApiError>;

    /// Replace the secrets of one vault environment.
    fn push_secrets(
        &self,
        token: &str,
        repo: &RepoRef,
        environment: &str,
        secrets: &SecretSet,
    ) -> Result<(), ApiError>;

    /// List the projects of every connection to `provider`.
    fn list_provider_projects(
        &self,
        token: &str,
        provider: &str,
    ) -> Result<Vec<ProviderProject>, ApiError>;

    /// Fetch the secrets of one provider project environment.
    fn provider_secrets(&self, token: &str, target: &SyncTarget) -> Result<SecretSet, ApiError>;

    /// Apply an approved sync preview.
    fn execute_sync(&self, token: &str, request: &SyncRequest) -> Result<SyncSummary, ApiError>;
}

/// Body of a sync execution.
///
/// Carries the approved key lists so the server applies exactly what was
/// previewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub owner: String,
    pub repo: String,
    pub connection_id: String,
    pub project_id: String,
    pub keyway_environment: String,
    pub provider_environment: String,
    pub direction: Direction,
    pub allow_delete: bool,
    #[serde(flatten)]
    pub preview: SyncPreview,
}

impl SyncRequest {
    /// Build a request for `target` from an approved preview.
    pub fn new(
        target: &SyncTarget,
        direction: Direction,
        allow_delete: bool,
        preview: &SyncPreview,
    ) -> Self {
        Self {
            owner: target.repo.owner().to_string(),
            repo: target.repo.name().to_string(),
            connection_id: target.connection_id.clone(),
            project_id: target.project_id.clone(),
            keyway_environment: target.keyway_environment.clone(),
            provider_environment: target.provider_environment.clone(),
            direction,
            allow_delete,
            preview: preview.clone(),
        }
    }
}
