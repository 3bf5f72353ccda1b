//! Login command.

use tracing::info;

use crate::cli::{output, Context};
use crate::core::api::AuthApi;
use crate::core::auth::{self, DeviceAuthClient};
use crate::core::domain::StoredCredential;
use crate::core::store::CredentialStore;
use crate::error::Result;

/// Log in with the device flow, or with a personal access token.
pub fn execute(ctx: &Context, token: Option<String>) -> Result<()> {
    if ctx.settings.env_token.is_some() {
        output::warn("KEYWAY_TOKEN is set and takes precedence over the stored login");
    }

    let credential = match token {
        Some(token) => {
            info!("logging in with a personal access token");
            auth::login_with_token(ctx.client(), ctx.store(), &token)?
        }
        None => device_login(ctx.client(), ctx.store())?,
    };

    output::success(&format!("logged in as {}", credential.login_handle));
    Ok(())
}

/// Run the device flow, printing the code and link for the user.
pub(crate) fn device_login(
    api: &dyn AuthApi,
    store: &dyn CredentialStore,
) -> Result<StoredCredential> {
    let client = DeviceAuthClient::new(api, store);

    let result = client.login(|session, opened| {
        output::section("Log in to Keyway");
        output::kv("code:", &session.user_code);
        output::kv("url: ", &session.verification_uri);
        if opened {
            output::dimmed("Browser opened. Confirm the code there.");
        } else {
            output::dimmed("Open the URL above and enter the code.");
        }
        println!();
        output::progress("Waiting for approval");
    });

    output::progress_done(result.is_ok());
    result
}
