//! Push command - upload the local env file to the vault.

use crate::cli::output::{self, Change};
use crate::cli::{prompt, Context, FileArgs};
use crate::core::api::VaultApi;
use crate::core::domain::{RepoRef, SecretSet};
use crate::core::env::EnvFile;
use crate::core::merge::{self, PushPlan};
use crate::error::{ApiError, Result, ValidationError};

/// Merge the local file into the vault environment.
///
/// Vault-only secrets are kept unless `prune` is set.
pub fn execute(ctx: &Context, args: &FileArgs, prune: bool, yes: bool) -> Result<()> {
    let repo = ctx.repo()?;
    let environment = ctx.environment(args.env.as_deref())?;
    let local = EnvFile::load(&args.file)?;

    if local.secrets().is_empty() {
        return Err(ValidationError::EmptyEnvFile(args.file.display().to_string()).into());
    }
    warn_duplicates(&local);

    ctx.run(|token| {
        let remote = fetch_remote(ctx.client(), token, &repo, &environment)?;
        let plan = merge::push_merge(local.secrets(), &remote, prune);

        if !plan.has_changes() {
            output::success(&format!("{}/{} is up to date", repo, environment));
            return Ok(());
        }

        show_plan(&plan, &repo, &environment);

        let question = format!(
            "Push {} to {}/{}?",
            output::plural(plan.secrets.len(), "secret"),
            repo,
            environment
        );
        if !prompt::confirm(&question, "push", yes, ctx.interactive())? {
            output::dimmed("cancelled");
            return Ok(());
        }

        ctx.client()
            .push_secrets(token, &repo, &environment, &plan.secrets)?;
        output::success(&format!(
            "pushed {} to {}/{}",
            output::plural(plan.secrets.len(), "secret"),
            repo,
            environment
        ));
        Ok(())
    })
}

/// Warn when the file repeats keys, since only the last value of each is used.
pub(crate) fn warn_duplicates(local: &EnvFile) {
    let entries = local.entry_count();
    let keys = local.secrets().len();
    if entries > keys {
        output::warn(&format!(
            "{} has {} for {}; later values win",
            local.path().display(),
            output::plural(entries, "entry line"),
            output::plural(keys, "key")
        ));
    }
}

/// Vault contents, or an empty set for an environment that does not exist yet.
pub(crate) fn fetch_remote(
    api: &dyn VaultApi,
    token: &str,
    repo: &RepoRef,
    environment: &str,
) -> Result<SecretSet> {
    match api.pull_secrets(token, repo, environment) {
        Ok(secrets) => Ok(secrets),
        Err(ApiError::NotFound { .. }) => Ok(SecretSet::new()),
        Err(e) => Err(e.into()),
    }
}

fn show_plan(plan: &PushPlan, repo: &RepoRef, environment: &str) {
    output::section(&format!("Push to {}/{}", repo, environment));
    output::changes(Change::Added, &plan.diff.added);
    output::changes(Change::Changed, &plan.diff.changed);
    output::changes(Change::Removed, plan.deletions());
    println!();

    let removed = plan.removed();
    if removed.is_empty() {
        return;
    }

    if plan.prune {
        output::warn(&format!(
            "{} will be deleted from the vault",
            output::plural(removed.len(), "secret")
        ));
    } else {
        output::warn(&format!(
            "{} only in the vault, kept (use --prune to delete): {}",
            output::plural(removed.len(), "secret"),
            removed.join(", ")
        ));
    }
}
