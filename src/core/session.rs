//! Authenticated sessions.
//!
//! A [`Session`] hands a bearer token to API operations and recovers from an
//! expired token by logging in again and retrying the operation once.

use tracing::{debug, info};

use crate::core::domain::StoredCredential;
use crate::core::store::CredentialStore;
use crate::error::{AuthError, Result};

/// Obtains a fresh credential, typically by running the device login.
pub trait Authenticator {
    fn authenticate(&self) -> Result<StoredCredential>;
}

/// Token resolution and 401 recovery for API calls.
pub struct Session<'a> {
    store: &'a dyn CredentialStore,
    env_token: Option<String>,
    authenticator: Option<&'a dyn Authenticator>,
}

impl<'a> Session<'a> {
    /// Session over `store`. Without an authenticator, a missing or
    /// rejected credential is an error instead of a login prompt.
    pub fn new(store: &'a dyn CredentialStore) -> Self {
        Self {
            store,
            env_token: None,
            authenticator: None,
        }
    }

    /// Use a token from the environment instead of the stored credential.
    pub fn with_env_token(mut self, token: Option<String>) -> Self {
        self.env_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Allow interactive re-authentication.
    pub fn with_authenticator(mut self, authenticator: &'a dyn Authenticator) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Resolve the token to use: environment, then store, then login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::LoginRequired` when no token is available and
    /// the session cannot prompt.
    pub fn token(&self) -> Result<String> {
        if let Some(token) = &self.env_token {
            debug!("using token from environment");
            return Ok(token.clone());
        }

        if let Some(credential) = self.store.get() {
            return Ok(credential.token);
        }

        Ok(self.login()?.token)
    }

    /// Run `op` with a token, re-authenticating and retrying once if the
    /// API answers 401. A second 401 is returned as is.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when an environment token is
    /// rejected, `AuthError::LoginRequired` when re-authentication is not
    /// possible, or whatever `op` returns.
    pub fn run<T>(&self, mut op: impl FnMut(&str) -> Result<T>) -> Result<T> {
        let token = self.token()?;

        match op(&token) {
            Err(e) if e.is_unauthorized() => {
                if self.env_token.is_some() {
                    return Err(AuthError::InvalidToken.into());
                }

                info!("stored credential rejected, logging in again");
                self.store.clear()?;
                let credential = self.login()?;
                op(&credential.token)
            }
            other => other,
        }
    }

    fn login(&self) -> Result<StoredCredential> {
        match self.authenticator {
            Some(authenticator) => authenticator.authenticate(),
            None => Err(AuthError::LoginRequired.into()),
        }
    }
}
