//! Pull command - download vault secrets into the local env file.

use crate::cli::output::{self, Change};
use crate::cli::{prompt, Context, FileArgs};
use crate::core::api::VaultApi;
use crate::core::env::EnvFile;
use crate::core::merge;
use crate::error::Result;

/// Write the vault environment into the local file.
///
/// Local-only entries are kept unless `force` is set. With `force`, an
/// existing file is only replaced after confirmation.
pub fn execute(ctx: &Context, args: &FileArgs, force: bool, yes: bool) -> Result<()> {
    let repo = ctx.repo()?;
    let environment = ctx.environment(args.env.as_deref())?;

    let remote = ctx.run(|token| {
        ctx.client()
            .pull_secrets(token, &repo, &environment)
            .map_err(Into::into)
    })?;

    let mut local = EnvFile::load_or_empty(&args.file)?;
    let plan = merge::plan_pull(local.secrets(), &remote, force);
    let file = args.file.display().to_string();

    if force && local.exists() {
        // Local-only keys: present in the file, absent from the vault.
        let dropped = &plan.diff.removed;
        output::section(&format!("Replace {}", file));
        output::changes(Change::Removed, dropped);
        println!();

        let question = if dropped.is_empty() {
            format!("Overwrite {}?", file)
        } else {
            format!(
                "Overwrite {} and drop {}?",
                file,
                output::plural(dropped.len(), "local secret")
            )
        };
        if !prompt::confirm(&question, "pull --force", yes, ctx.interactive())? {
            output::dimmed("cancelled");
            return Ok(());
        }
    }

    local.write(&plan.content)?;

    output::success(&format!(
        "pulled {} from {}/{} into {}",
        output::plural(remote.len(), "secret"),
        repo,
        environment,
        file
    ));
    if !plan.preserved.is_empty() {
        output::dimmed(&format!(
            "kept {} only in {}",
            output::plural(plan.preserved.len(), "local secret"),
            file
        ));
    }

    Ok(())
}
