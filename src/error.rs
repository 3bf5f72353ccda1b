//! Error types.
//!
//! Each concern owns a small error enum; all of them fold into [`Error`]
//! so command handlers can use `?` throughout.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),
}

/// Configuration and environment errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine a config directory (set KEYWAY_CONFIG_DIR)")]
    NoConfigDir,

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("invalid config.toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("git executable not found in PATH")]
    GitNotFound,

    #[error("no `origin` remote configured for this repository")]
    NoRemote,

    #[error("env file not found: {0}")]
    EnvFileNotFound(String),
}

/// Local credential store errors.
///
/// Only write paths can fail. Reads degrade to "no credential".
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encrypt credential: {0}")]
    Encrypt(#[from] CipherError),
}

/// Errors from the AES-256-GCM codec.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid key: expected 64 hex characters")]
    InvalidKey,

    #[error("invalid ciphertext format: {0}")]
    InvalidFormat(String),

    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    NonceLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed: data corrupted or wrong key")]
    DecryptionFailed,
}

/// Errors returned by the vault API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("authentication failed (401)")]
    Unauthorized,

    #[error("{detail}")]
    PlanLimit {
        detail: String,
        upgrade_url: Option<String>,
    },

    #[error("not found: {detail}")]
    NotFound { detail: String },

    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Authentication flow errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("device code expired before it was approved")]
    Expired,

    #[error("authorization was denied")]
    Denied,

    #[error("timed out waiting for authorization")]
    TimedOut,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("login required but running non-interactively")]
    LoginRequired,

    #[error("token was rejected by the server")]
    InvalidToken,
}

/// Provider sync errors.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("no {provider} connection found")]
    NoConnection { provider: String },

    #[error("no {provider} project matches {repo}")]
    NoProjectMatch { provider: String, repo: String },

    #[error("several projects could match {repo}: {}", candidates.join(", "))]
    AmbiguousProject {
        repo: String,
        candidates: Vec<String>,
    },

    #[error("project not found: {0}")]
    UnknownProject(String),

    #[error("deleting secrets is only allowed when pushing to the provider")]
    DeleteOnPull,
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid repository: {0} (expected owner/name)")]
    InvalidRepo(String),

    #[error("invalid environment name: {0}")]
    InvalidEnvironment(String),

    #[error("invalid secret key: {0:?}")]
    InvalidKey(String),

    #[error("environment {environment} does not exist on {project} (available: {})", available.join(", "))]
    UnknownProviderEnvironment {
        environment: String,
        project: String,
        available: Vec<String>,
    },

    #[error("no secrets found in {0}")]
    EmptyEnvFile(String),

    #[error("{0} requires confirmation: pass --yes when running non-interactively")]
    ConfirmationRequired(String),
}

/// Result type alias for keyway operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this is a 401 from the vault API.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized))
    }
}
