//! Blocking HTTP client for the vault API.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthApi, SyncRequest, VaultApi};
use crate::core::codec;
use crate::core::constants;
use crate::core::domain::{
    DevicePoll, DeviceSession, ProviderProject, RepoRef, SecretSet, SyncSummary, SyncTarget,
    TokenInfo,
};
use crate::error::ApiError;

/// Env-file text, the payload of vault and provider secret endpoints.
#[derive(Debug, Serialize, Deserialize)]
struct ContentBody {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ProjectsBody {
    #[serde(default)]
    projects: Vec<ProviderProject>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PollBody<'a> {
    device_code: &'a str,
}

#[derive(Debug, Serialize)]
struct ValidateBody<'a> {
    token: &'a str,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default, alias = "message", alias = "error")]
    detail: Option<String>,
    #[serde(default)]
    upgrade_url: Option<String>,
}

/// Vault API client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the TLS backend cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(constants::HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn vault_url(&self, repo: &RepoRef, environment: &str) -> String {
        self.url(&format!(
            "/v1/vaults/{}/{}/{}",
            repo.owner(),
            repo.name(),
            environment
        ))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = checked(request.send()?)?;
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl AuthApi for HttpClient {
    fn start_device_login(&self) -> Result<DeviceSession, ApiError> {
        debug!("starting device login");
        self.send(
            self.client
                .post(self.url("/v1/auth/device/start"))
                .json(&serde_json::json!({})),
        )
    }

    fn poll_device_login(&self, device_code: &str) -> Result<DevicePoll, ApiError> {
        self.send(
            self.client
                .post(self.url("/v1/auth/device/poll"))
                .json(&PollBody { device_code }),
        )
    }

    fn validate_token(&self, token: &str) -> Result<TokenInfo, ApiError> {
        self.send(
            self.client
                .post(self.url("/v1/auth/token/validate"))
                .json(&ValidateBody { token }),
        )
    }
}

impl VaultApi for HttpClient {
    fn pull_secrets(
        &self,
        token: &str,
        repo: &RepoRef,
        environment: &str,
    ) -> Result<SecretSet, ApiError> {
        debug!(repo = %repo, environment, "pulling vault secrets");
        let body: ContentBody = self.send(
            self.client
                .get(self.vault_url(repo, environment))
                .bearer_auth(token),
        )?;
        Ok(codec::parse(&body.content))
    }

    fn push_secrets(
        &self,
        token: &str,
        repo: &RepoRef,
        environment: &str,
        secrets: &SecretSet,
    ) -> Result<(), ApiError> {
        debug!(repo = %repo, environment, count = secrets.len(), "pushing vault secrets");
        let request = self
            .client
            .post(self.vault_url(repo, environment))
            .bearer_auth(token)
            .json(&ContentBody {
                content: codec::serialize(secrets),
            });
        checked(request.send()?)?;
        Ok(())
    }

    fn list_provider_projects(
        &self,
        token: &str,
        provider: &str,
    ) -> Result<Vec<ProviderProject>, ApiError> {
        let body: ProjectsBody = self.send(
            self.client
                .get(self.url("/v1/integrations/projects"))
                .query(&[("provider", provider)])
                .bearer_auth(token),
        )?;
        debug!(provider, count = body.projects.len(), "listed provider projects");
        Ok(body.projects)
    }

    fn provider_secrets(&self, token: &str, target: &SyncTarget) -> Result<SecretSet, ApiError> {
        let path = format!(
            "/v1/integrations/{}/projects/{}/secrets",
            target.connection_id, target.project_id
        );
        let body: ContentBody = self.send(
            self.client
                .get(self.url(&path))
                .query(&[("environment", target.provider_environment.as_str())])
                .bearer_auth(token),
        )?;
        Ok(codec::parse(&body.content))
    }

    fn execute_sync(&self, token: &str, request: &SyncRequest) -> Result<SyncSummary, ApiError> {
        debug!(
            direction = %request.direction,
            project = %request.project_id,
            "executing sync"
        );
        self.send(
            self.client
                .post(self.url("/v1/integrations/sync"))
                .bearer_auth(token)
                .json(request),
        )
    }
}

fn user_agent() -> String {
    format!("keyway-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Map a non-2xx response to an `ApiError`.
fn checked(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&raw).unwrap_or_default();
    let detail = body
        .detail
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| status_text(status));

    debug!(status = status.as_u16(), %detail, "api request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::PlanLimit {
            detail,
            upgrade_url: body.upgrade_url,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound { detail },
        _ => ApiError::Server {
            status: status.as_u16(),
            detail,
        },
    })
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
