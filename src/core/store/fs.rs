//! Filesystem-based credential storage.
//!
//! Stores the encrypted credential in `<config dir>/config.json` as
//! `{"auth": "iv:authTag:ciphertext"}`, next to the key file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{CredentialStore, KeyFile};
use crate::core::constants;
use crate::core::crypto;
use crate::core::domain::StoredCredential;
use crate::error::{CredentialError, Result};

/// On-disk record. `auth` is absent after a logout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth: Option<String>,
}

/// Credential store backed by files in the config directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the encrypted credential file.
    pub fn credential_path(&self) -> PathBuf {
        self.dir.join(constants::CREDENTIAL_FILE)
    }

    /// The key file used to encrypt the credential.
    pub fn key_file(&self) -> KeyFile {
        KeyFile::new(self.dir.join(constants::KEY_FILE))
    }

    fn read_record(&self) -> Option<ConfigRecord> {
        let path = self.credential_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "credential file unreadable");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(_) => {
                self.discard("credential file is not valid JSON");
                None
            }
        }
    }

    fn decrypt_record(&self, encrypted: &str) -> Option<StoredCredential> {
        let key = match self.key_file().load_or_create() {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "encryption key unavailable");
                return None;
            }
        };

        let plaintext = match crypto::decrypt(encrypted, &key) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                self.discard(&e.to_string());
                return None;
            }
        };

        match serde_json::from_str(&plaintext) {
            Ok(credential) => Some(credential),
            Err(_) => {
                self.discard("decrypted credential is malformed");
                None
            }
        }
    }

    // Self-heal: a corrupted credential becomes "logged out".
    fn discard(&self, reason: &str) {
        info!(reason, "discarding stored credential");
        if let Err(e) = self.clear() {
            warn!(error = %e, "failed to clear credential file");
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<StoredCredential> {
        let record = self.read_record()?;
        let encrypted = record.auth.filter(|auth| !auth.trim().is_empty())?;
        let credential = self.decrypt_record(&encrypted)?;

        if credential.is_expired() {
            self.discard("credential expired");
            return None;
        }

        debug!(login = %credential.login_handle, "loaded stored credential");
        Some(credential)
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

        let key = self.key_file().load_or_create()?;
        let plaintext = serde_json::to_string(&credential)?;
        let record = ConfigRecord {
            auth: Some(crypto::encrypt(&plaintext, &key).map_err(CredentialError::from)?),
        };

        write_private(&self.credential_path(), &serde_json::to_string_pretty(&record)?)?;
        debug!(login = %login_handle, "credential saved");

        Ok(credential)
    }

    fn clear(&self) -> Result<()> {
        let path = self.credential_path();
        if !path.exists() {
            return Ok(());
        }

        let empty = serde_json::to_string_pretty(&ConfigRecord::default())?;
        write_private(&path, &empty)?;
        debug!("credential cleared");

        Ok(())
    }
}

/// Atomically write `contents` to `path` with owner-only permissions.
///
/// Parent directories are created with mode 0700. The content goes to a
/// temporary file in the same directory first and is renamed into place,
/// so readers never observe a partial write.
pub(crate) fn write_private(
    path: &Path,
    contents: &str,
) -> std::result::Result<(), CredentialError> {
    let fail = |source: std::io::Error| CredentialError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        create_private_dir(parent).map_err(fail)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let result = write_new_private(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.map_err(fail)
}

fn write_new_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)
}
