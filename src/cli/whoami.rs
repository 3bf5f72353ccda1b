//! Whoami command - show the stored identity.

use crate::cli::{output, Context};
use crate::core::store::CredentialStore;
use crate::error::{AuthError, Result};

/// Print the logged-in user and when the credential expires.
pub fn execute(ctx: &Context) -> Result<()> {
    if ctx.settings.env_token.is_some() {
        output::kv("source:", "KEYWAY_TOKEN");
        return Ok(());
    }

    let credential = ctx.store().get().ok_or(AuthError::NotLoggedIn)?;

    output::kv("login:  ", &credential.login_handle);
    match credential.expires_at {
        Some(expires_at) => output::kv("expires:", expires_at.format("%Y-%m-%d %H:%M UTC")),
        None => output::kv("expires:", "never"),
    }

    Ok(())
}
