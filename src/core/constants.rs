//! Constants used throughout keyway.
//!
//! Centralizes file names, environment variables, and flow limits.

use std::time::Duration;

/// Default vault API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.keyway.sh";

/// Default local env file.
pub const ENV_FILE: &str = ".env";

/// Default vault environment.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Directory name under the platform config dir (`~/.config/keyway`).
pub const CONFIG_DIR_NAME: &str = "keyway";

/// Encrypted credential file, relative to the config dir.
pub const CREDENTIAL_FILE: &str = "config.json";

/// Hex-encoded encryption key file, relative to the config dir.
pub const KEY_FILE: &str = ".key";

/// Optional user settings file, relative to the config dir.
pub const SETTINGS_FILE: &str = "config.toml";

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "KEYWAY_CONFIG_DIR";

/// Overrides the stored credential with a raw token.
pub const TOKEN_ENV: &str = "KEYWAY_TOKEN";

/// Overrides the API base URL.
pub const API_URL_ENV: &str = "KEYWAY_API_URL";

/// Log filter directive.
pub const LOG_ENV: &str = "KEYWAY_LOG";

/// Set by most CI systems; forces non-interactive mode.
pub const CI_ENV: &str = "CI";

/// Lowest poll interval honoured during the device flow.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Poll interval used when the server sends an implausible one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Server intervals above this are treated as implausible.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on how long a device flow may wait for approval.
pub const MAX_DEVICE_FLOW: Duration = Duration::from_secs(30 * 60);

/// HTTP request timeout for vault API calls.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
