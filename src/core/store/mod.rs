//! Local credential storage.
//!
//! Holds the bearer token for the vault API, encrypted at rest with a
//! machine-local AES-256-GCM key.
//!
//! The stored files are untrusted input: anything that cannot be read,
//! decrypted, or parsed is treated as "not logged in" and cleared, never
//! surfaced as an error.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `CredentialStore` trait
//! 2. Add the implementation in a new file (e.g., `keychain.rs`)
//! 3. Re-export from this module

use chrono::{DateTime, Utc};

use crate::core::domain::StoredCredential;
use crate::error::Result;

mod fs;
mod key;
#[cfg(test)]
mod memory;

pub use fs::FileStore;
pub use key::KeyFile;

pub(crate) use fs::write_private;
#[cfg(test)]
pub(crate) use memory::MemoryStore;

/// Credential storage trait.
pub trait CredentialStore {
    /// Load the stored credential.
    ///
    /// Returns `None` when there is no credential, when it has expired, or
    /// when it cannot be decrypted. The latter two also clear the store.
    fn get(&self) -> Option<StoredCredential>;

    /// Persist a credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if the credential cannot be encrypted or
    /// written.
    fn save(
        &self,
        token: &str,
        login_handle: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<StoredCredential>;

    /// Remove the stored credential. A no-op when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if an existing file cannot be overwritten.
    fn clear(&self) -> Result<()>;
}
