//! Diff command - compare the local env file with the vault.

use crate::cli::output::{self, Change};
use crate::cli::push::{fetch_remote, warn_duplicates};
use crate::cli::{Context, FileArgs};
use crate::core::domain::{Diff, EntryStatus};
use crate::core::env::EnvFile;
use crate::error::Result;

/// Print which keys differ between the local file and the vault.
///
/// Only keys are shown, never values.
pub fn execute(ctx: &Context, args: &FileArgs) -> Result<()> {
    let repo = ctx.repo()?;
    let environment = ctx.environment(args.env.as_deref())?;
    let local = EnvFile::load(&args.file)?;
    warn_duplicates(&local);

    let remote = ctx.run(|token| fetch_remote(ctx.client(), token, &repo, &environment))?;
    let diff = Diff::compute(local.secrets(), &remote);

    output::section(&format!(
        "{} vs {}/{}",
        args.file.display(),
        repo,
        environment
    ));

    for entry in diff.entries() {
        let kind = match entry.status() {
            EntryStatus::Added => Change::Added,
            EntryStatus::Removed => Change::Removed,
            EntryStatus::Changed => Change::Changed,
            EntryStatus::Same => continue,
        };
        output::change(kind, entry.key());
    }

    if diff.is_in_sync() {
        output::success("in sync");
    } else {
        println!();
        output::dimmed(&format!(
            "{} local only, {} vault only, {} changed, {} same",
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len(),
            diff.same.len()
        ));
    }

    Ok(())
}
