//! Device authorization types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A started device authorization, as returned by the start endpoint.
///
/// Consumed by one poll loop and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSession {
    pub device_code: String,
    pub user_code: String,
    #[serde(alias = "verificationURI")]
    pub verification_uri: String,
    #[serde(default, alias = "verificationURIComplete")]
    pub verification_uri_complete: Option<String>,
    /// Seconds until the device code expires.
    #[serde(default)]
    pub expires_in: u64,
    /// Seconds the server asks us to wait between polls.
    #[serde(default, rename = "interval")]
    pub poll_interval_seconds: u64,
}

impl DeviceSession {
    /// The URL to open in a browser, preferring the pre-filled variant.
    pub fn browser_url(&self) -> &str {
        self.verification_uri_complete
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

/// Status reported by one poll of the device flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Pending,
    Approved,
    Expired,
    Denied,
}

/// One poll response.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePoll {
    pub status: PollStatus,
    #[serde(default)]
    pub keyway_token: Option<String>,
    #[serde(default)]
    pub github_login: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl DevicePoll {
    /// A pending response.
    pub fn pending() -> Self {
        Self {
            status: PollStatus::Pending,
            keyway_token: None,
            github_login: None,
            expires_at: None,
        }
    }
}

impl std::fmt::Debug for DevicePoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevicePoll")
            .field("status", &self.status)
            .field("has_token", &self.keyway_token.is_some())
            .field("github_login", &self.github_login)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Result of validating a personal access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub username: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
