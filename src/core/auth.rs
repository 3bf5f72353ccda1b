//! Device authorization login.
//!
//! Flow:
//! 1. Request a device code from the API
//! 2. Open the verification URL and show the user code
//! 3. Poll until the user approves, denies, or the code expires
//! 4. Persist the issued token in the credential store
//!
//! Time and the browser are injected through [`Clock`] and [`UrlOpener`] so
//! the poll loop can be driven deterministically.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::core::api::AuthApi;
use crate::core::constants;
use crate::core::domain::{DeviceSession, PollStatus, StoredCredential};
use crate::core::store::CredentialStore;
use crate::error::{ApiError, AuthError, Result};

/// Source of time for the poll loop.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Opens a URL for the user. Returns whether it succeeded.
pub trait UrlOpener {
    fn open(&self, url: &str) -> bool;
}

/// The system browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> bool {
        match open::that(url) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "could not open browser");
                false
            }
        }
    }
}

/// Drives the device authorization flow and stores the resulting token.
pub struct DeviceAuthClient<'a> {
    api: &'a dyn AuthApi,
    store: &'a dyn CredentialStore,
    clock: &'a dyn Clock,
    opener: &'a dyn UrlOpener,
}

impl<'a> DeviceAuthClient<'a> {
    /// Client using the system clock and browser.
    pub fn new(api: &'a dyn AuthApi, store: &'a dyn CredentialStore) -> Self {
        Self {
            api,
            store,
            clock: &SystemClock,
            opener: &SystemBrowser,
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the URL opener.
    pub fn with_opener(mut self, opener: &'a dyn UrlOpener) -> Self {
        self.opener = opener;
        self
    }

    /// Start a device authorization.
    ///
    /// # Errors
    ///
    /// Returns the API error if the start request fails.
    pub fn start(&self) -> Result<DeviceSession> {
        let session = self.api.start_device_login()?;
        debug!(
            expires_in = session.expires_in,
            interval = session.poll_interval_seconds,
            "device login started"
        );
        Ok(session)
    }

    /// Poll until the session is approved, denied, or expired, or until the
    /// deadline passes. An approval is persisted before it is returned.
    ///
    /// Failed polls are logged and retried; only the deadline bounds them.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Denied`, `AuthError::Expired`, or
    /// `AuthError::TimedOut`, or a `CredentialError` if the token cannot be
    /// saved.
    pub fn poll_until_done(&self, session: &DeviceSession) -> Result<StoredCredential> {
        let interval = poll_interval(session.poll_interval_seconds);
        let deadline = self.clock.now() + flow_timeout(session.expires_in);

        loop {
            // The last wait is cut short so no poll lands past the deadline.
            let remaining = deadline.saturating_duration_since(self.clock.now());
            self.clock.sleep(interval.min(remaining));
            if self.clock.now() >= deadline {
                break;
            }

            let poll = match self.api.poll_device_login(&session.device_code) {
                Ok(poll) => poll,
                Err(e) => {
                    log_poll_failure(&e);
                    continue;
                }
            };

            match poll.status {
                PollStatus::Pending => {}
                PollStatus::Approved => {
                    let token = poll.keyway_token.filter(|t| !t.trim().is_empty());
                    let Some(token) = token else {
                        debug!("approved without a token, polling again");
                        continue;
                    };
                    let login = poll.github_login.unwrap_or_default();
                    let credential = self.store.save(&token, &login, poll.expires_at)?;
                    info!(login = %credential.login_handle, "device login approved");
                    return Ok(credential);
                }
                PollStatus::Expired => return Err(AuthError::Expired.into()),
                PollStatus::Denied => return Err(AuthError::Denied.into()),
            }
        }

        Err(AuthError::TimedOut.into())
    }

    /// Run the whole flow.
    ///
    /// The verification URL is opened before `on_start` is called with the
    /// session and whether the browser opened, so the caller can show the
    /// user code and a fallback link.
    pub fn login(
        &self,
        on_start: impl FnOnce(&DeviceSession, bool),
    ) -> Result<StoredCredential> {
        let session = self.start()?;
        let opened = self.opener.open(session.browser_url());
        on_start(&session, opened);
        self.poll_until_done(&session)
    }
}

/// Validate a personal access token and store it.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the API rejects the token.
pub fn login_with_token(
    api: &dyn AuthApi,
    store: &dyn CredentialStore,
    token: &str,
) -> Result<StoredCredential> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken.into());
    }

    let info = match api.validate_token(token) {
        Ok(info) => info,
        Err(ApiError::Unauthorized) => return Err(AuthError::InvalidToken.into()),
        Err(e) => return Err(e.into()),
    };

    store.save(token, &info.username, info.expires_at)
}

/// Server-requested poll interval, clamped to a sane range.
///
/// Zero or anything above the maximum falls back to the default; smaller
/// values are raised to the floor.
pub fn poll_interval(seconds: u64) -> Duration {
    let requested = Duration::from_secs(seconds);
    if seconds == 0 || requested > constants::MAX_POLL_INTERVAL {
        return constants::DEFAULT_POLL_INTERVAL;
    }
    requested.max(constants::MIN_POLL_INTERVAL)
}

/// Overall flow deadline from the session's `expiresIn`, capped.
pub fn flow_timeout(expires_in: u64) -> Duration {
    let requested = Duration::from_secs(expires_in);
    if expires_in == 0 || requested > constants::MAX_DEVICE_FLOW {
        constants::MAX_DEVICE_FLOW
    } else {
        requested
    }
}

fn log_poll_failure(error: &ApiError) {
    match error {
        ApiError::Transport(_) => debug!(error = %error, "poll failed, retrying"),
        _ => warn!(error = %error, "unexpected poll response, retrying"),
    }
}
