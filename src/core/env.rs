//! Local env file.
//!
//! Reads and writes the `.env` file the developer works with. Parsing and
//! serialization live in [`crate::core::codec`]; this module only adds the
//! file handling.

#[cfg(unix)]
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::codec;
use crate::core::domain::SecretSet;
use crate::error::{ConfigError, Result};

/// A local env file and its parsed contents.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    raw: String,
    secrets: SecretSet,
}

impl EnvFile {
    /// Load an env file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvFileNotFound` if the file does not exist,
    /// or an I/O error if it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading env file");

        if !path.exists() {
            return Err(ConfigError::EnvFileNotFound(path.display().to_string()).into());
        }

        let raw = std::fs::read_to_string(path)?;
        let secrets = codec::parse(&raw);

        debug!(entries = secrets.len(), "env file loaded");

        Ok(Self {
            path: path.to_path_buf(),
            raw,
            secrets,
        })
    }

    /// Load an env file, treating a missing file as empty.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self {
                path: path.to_path_buf(),
                raw: String::new(),
                secrets: SecretSet::new(),
            })
        }
    }

    /// Whether the file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Parsed secrets.
    pub fn secrets(&self) -> &SecretSet {
        &self.secrets
    }

    /// Number of entry lines in the file as read.
    pub fn entry_count(&self) -> usize {
        codec::count_entries(&self.raw)
    }

    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with `content`.
    ///
    /// The file is created with owner-only permissions on Unix.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write(&mut self, content: &str) -> Result<()> {
        debug!(path = %self.path.display(), "writing env file");

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;

            // Tighten permissions on files that already existed.
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&self.path, content)?;
        }

        self.raw = content.to_string();
        self.secrets = codec::parse(content);

        Ok(())
    }
}
