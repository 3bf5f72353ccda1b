//! Runtime settings.
//!
//! Each setting is resolved from, in order: a command-line flag, an
//! environment variable, `config.toml` in the config directory, and a
//! built-in default.

use std::fs;
use std::io::{ErrorKind, IsTerminal};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result, ValidationError};

/// Contents of the optional `config.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_environment: Option<String>,
}

impl FileSettings {
    /// Load `config.toml` from `dir`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for a malformed file and
    /// `ConfigError::ReadFile` if it exists but cannot be read.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(constants::SETTINGS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::ReadFile(e).into()),
        };

        let settings = toml::from_str(&content).map_err(ConfigError::from)?;
        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub assume_yes: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub config_dir: PathBuf,
    pub env_token: Option<String>,
    pub default_environment: String,
    pub interactive: bool,
}

impl Settings {
    /// Resolve settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no config directory can be determined or
    /// `config.toml` is invalid.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        Self::resolve_from(
            overrides,
            |name| std::env::var(name).ok(),
            std::io::stdin().is_terminal(),
        )
    }

    /// Resolve settings with an explicit environment lookup.
    pub fn resolve_from(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
        stdin_is_tty: bool,
    ) -> Result<Self> {
        let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let config_dir = match var(constants::CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join(constants::CONFIG_DIR_NAME),
        };
        let file = FileSettings::load(&config_dir)?;

        let api_url = overrides
            .api_url
            .clone()
            .or_else(|| var(constants::API_URL_ENV))
            .or(file.api_url)
            .unwrap_or_else(|| constants::DEFAULT_API_URL.to_string());

        let default_environment = file
            .default_environment
            .unwrap_or_else(|| constants::DEFAULT_ENVIRONMENT.to_string());
        validate_environment(&default_environment)?;

        let interactive =
            !overrides.assume_yes && var(constants::CI_ENV).is_none() && stdin_is_tty;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            config_dir,
            env_token: var(constants::TOKEN_ENV).map(|t| t.trim().to_string()),
            default_environment,
            interactive,
        })
    }
}

/// Check a vault environment name: ASCII letters, digits, `-` and `_`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEnvironment` otherwise.
pub fn validate_environment(name: &str) -> std::result::Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEnvironment(name.to_string()))
    }
}
