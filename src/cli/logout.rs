//! Logout command.

use crate::cli::{output, Context};
use crate::core::store::CredentialStore;
use crate::error::Result;

/// Forget the stored credential. Succeeds when already logged out.
pub fn execute(ctx: &Context) -> Result<()> {
    ctx.store().clear()?;
    output::success("logged out");
    Ok(())
}
