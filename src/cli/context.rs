//! Per-invocation state shared by command handlers.

use tracing::debug;

use crate::cli::login;
use crate::core::api::HttpClient;
use crate::core::config::{self, Overrides, Settings};
use crate::core::domain::{RepoRef, StoredCredential};
use crate::core::git;
use crate::core::session::{Authenticator, Session};
use crate::core::store::FileStore;
use crate::error::Result;

/// Resolved settings plus the collaborators built from them.
pub struct Context {
    pub settings: Settings,
    repo: Option<String>,
    store: FileStore,
    client: HttpClient,
}

impl Context {
    /// Build the context for one command.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be resolved or the HTTP client
    /// cannot be created.
    pub fn new(api_url: Option<String>, repo: Option<String>, assume_yes: bool) -> Result<Self> {
        let settings = Settings::resolve(&Overrides {
            api_url,
            assume_yes,
        })?;
        debug!(
            api_url = %settings.api_url,
            config_dir = %settings.config_dir.display(),
            interactive = settings.interactive,
            "settings resolved"
        );

        Ok(Self {
            store: FileStore::new(&settings.config_dir),
            client: HttpClient::new(&settings.api_url)?,
            repo,
            settings,
        })
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn interactive(&self) -> bool {
        self.settings.interactive
    }

    /// The repository from `--repo`, or from the git remote.
    pub fn repo(&self) -> Result<RepoRef> {
        match &self.repo {
            Some(repo) => Ok(repo.parse()?),
            None => git::detect_repo(&std::env::current_dir()?),
        }
    }

    /// The vault environment from `--env`, or the configured default.
    pub fn environment(&self, flag: Option<&str>) -> Result<String> {
        let environment = flag
            .map(str::trim)
            .unwrap_or(&self.settings.default_environment)
            .to_string();
        config::validate_environment(&environment)?;
        Ok(environment)
    }

    /// Run `op` with an API token, logging in again on a 401 when
    /// interactive.
    pub fn run<T>(&self, op: impl FnMut(&str) -> Result<T>) -> Result<T> {
        let device_login = DeviceLogin { ctx: self };
        let mut session =
            Session::new(&self.store).with_env_token(self.settings.env_token.clone());
        if self.settings.interactive {
            session = session.with_authenticator(&device_login);
        }
        session.run(op)
    }
}

struct DeviceLogin<'a> {
    ctx: &'a Context,
}

impl Authenticator for DeviceLogin<'_> {
    fn authenticate(&self) -> Result<StoredCredential> {
        login::device_login(self.ctx.client(), self.ctx.store())
    }
}
