//! Encryption key file.
//!
//! The key is generated once per machine and stored hex-encoded with
//! owner-only permissions. It is never rotated automatically; a missing or
//! malformed file simply yields a new key, which makes any credential
//! encrypted under the old one undecryptable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::write_private;
use crate::core::crypto::EncryptionKey;
use crate::error::CredentialError;

/// The on-disk encryption key.
#[derive(Debug, Clone)]
pub struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    /// Key file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the key, generating and persisting a new one if the file is
    /// missing, unreadable, or not exactly 64 hex characters.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::WriteFailed` if a new key cannot be saved.
    pub fn load_or_create(&self) -> Result<EncryptionKey, CredentialError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                #[cfg(unix)]
                {
                    warn_on_loose_permissions(&self.path);
                }

                match EncryptionKey::from_hex(contents.trim()) {
                    Ok(key) => return Ok(key),
                    Err(_) => {
                        warn!(path = %self.path.display(), "malformed key file, generating a new key")
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no key file, generating a new key");
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unreadable key file, generating a new key"
                );
            }
        }

        let key = EncryptionKey::generate();
        write_private(&self.path, &key.to_hex())?;
        Ok(key)
    }
}

#[cfg(unix)]
fn warn_on_loose_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode != 0o600 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key file permissions"
            );
        }
    }
}
