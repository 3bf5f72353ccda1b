//! In-memory credential store for unit tests.

use std::cell::RefCell;

use chrono::{DateTime, Utc};

use super::CredentialStore;
use crate::core::domain::StoredCredential;
use crate::error::Result;

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    credential: RefCell<Option<StoredCredential>>,
    pub(crate) clears: RefCell<usize>,
}

impl MemoryStore {
    pub(crate) fn with_token(token: &str) -> Self {
        let store = Self::default();
        store
            .save(token, "octocat", None)
            .expect("memory store never fails");
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<StoredCredential> {
        self.credential.borrow().clone()
    }

    fn save(
        &self,
        token: &str,
        login_handle: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<StoredCredential> {
        let credential = StoredCredential {
            token: token.to_string(),
            login_handle: login_handle.to_string(),
            expires_at,
            created_at: Utc::now(),
        };
        *self.credential.borrow_mut() = Some(credential.clone());
        Ok(credential)
    }

    fn clear(&self) -> Result<()> {
        *self.clears.borrow_mut() += 1;
        *self.credential.borrow_mut() = None;
        Ok(())
    }
}
