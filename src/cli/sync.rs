//! Sync command - reconcile the vault with a deployment provider.

use tracing::info;

use crate::cli::output::{self, Change};
use crate::cli::{prompt, Context};
use crate::core::api::VaultApi;
use crate::core::domain::{
    Direction, MatchType, ProjectMatch, ProviderProject, RepoRef, SyncOutcome, SyncTarget,
};
use crate::core::reconcile::{self, ReconcilerDeps, SyncPlan};
use crate::error::{Result, SyncError};

/// Arguments of `keyway sync`.
#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub provider: String,
    pub project: Option<String>,
    pub env: Option<String>,
    pub provider_env: Option<String>,
    pub pull: bool,
    pub allow_delete: bool,
    pub yes: bool,
}

/// Preview a sync, confirm it, and apply it.
pub fn execute(ctx: &Context, args: &SyncArgs) -> Result<()> {
    let direction = if args.pull {
        Direction::Pull
    } else {
        Direction::Push
    };
    if args.allow_delete && direction == Direction::Pull {
        return Err(SyncError::DeleteOnPull.into());
    }

    let repo = ctx.repo()?;
    let environment = ctx.environment(args.env.as_deref())?;
    let provider_environment = args
        .provider_env
        .as_deref()
        .map(str::trim)
        .unwrap_or(&environment)
        .to_string();

    let outcome = ctx.run(|token| {
        let projects = ctx.client().list_provider_projects(token, &args.provider)?;
        let found = choose_project(
            ctx,
            &projects,
            &args.provider,
            &repo,
            args.project.as_deref(),
        )?;
        let project = found.project;
        reconcile::check_environment(project, &provider_environment)?;

        if found.match_type != MatchType::Selected {
            output::dimmed(&format!(
                "using {} project {} ({})",
                args.provider,
                project.display_name(),
                found.match_type
            ));
        }

        let target = SyncTarget {
            repo: repo.clone(),
            connection_id: project.connection_id.clone(),
            project_id: project.id.clone(),
            keyway_environment: environment.clone(),
            provider_environment: provider_environment.clone(),
        };
        let deps = ReconcilerDeps {
            api: ctx.client(),
            token,
        };

        let plan = reconcile::plan(&deps, target, direction, args.allow_delete)?;
        let plan = maybe_switch_direction(ctx, args, plan)?;
        show_plan(&plan, &args.provider, project);

        reconcile::execute(&deps, &plan, |plan| {
            let question = format!("Apply this {} to {}?", plan.direction, args.provider);
            prompt::confirm(&question, "sync", args.yes, ctx.interactive())
        })
    })?;

    match outcome {
        SyncOutcome::Completed(summary) => output::success(&format!(
            "synced: {} created, {} updated, {} deleted",
            summary.created, summary.updated, summary.deleted
        )),
        SyncOutcome::UpToDate => output::success("already in sync"),
        SyncOutcome::Cancelled => output::dimmed("cancelled"),
    }

    Ok(())
}

/// Match the repository to a project, asking the user when the match is not
/// confident.
fn choose_project<'a>(
    ctx: &Context,
    projects: &'a [ProviderProject],
    provider: &str,
    repo: &RepoRef,
    requested: Option<&str>,
) -> Result<ProjectMatch<'a>> {
    match reconcile::select_project(projects, provider, repo, requested) {
        Ok(found) => Ok(found),
        Err(e @ (SyncError::AmbiguousProject { .. } | SyncError::NoProjectMatch { .. }))
            if ctx.interactive() =>
        {
            output::warn(&e.to_string());
            let names: Vec<String> = projects.iter().map(|p| p.display_name()).collect();
            let question = format!("Which {} project belongs to {}?", provider, repo);
            match prompt::select(&question, &names)? {
                Some(index) => Ok(ProjectMatch {
                    project: &projects[index],
                    match_type: MatchType::Selected,
                }),
                None => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn maybe_switch_direction(ctx: &Context, args: &SyncArgs, plan: SyncPlan) -> Result<SyncPlan> {
    let Some(recommended) = plan.recommended_direction() else {
        return Ok(plan);
    };

    let (empty, full) = match plan.direction {
        Direction::Push => ("vault", args.provider.as_str()),
        Direction::Pull => (args.provider.as_str(), "vault"),
    };
    output::warn(&format!(
        "{} is empty but {} has secrets; this looks like a first sync",
        empty, full
    ));

    if args.yes {
        return Ok(plan);
    }

    // Without a terminal the requested direction stands.
    if !ctx.interactive() {
        let flag = match recommended {
            Direction::Pull => "rerun with --pull",
            Direction::Push => "rerun without --pull",
        };
        output::dimmed(&format!("to {} instead, {}", recommended, flag));
        return Ok(plan);
    }

    let question = format!("Switch to {} instead?", recommended);
    if prompt::ask(&question, true, ctx.interactive())? {
        info!(from = %plan.direction, to = %recommended, "switching sync direction");
        return plan.with_direction(recommended);
    }

    Ok(plan)
}

fn show_plan(plan: &SyncPlan, provider: &str, project: &ProviderProject) {
    let (from, to) = match plan.direction {
        Direction::Push => ("vault", provider),
        Direction::Pull => (provider, "vault"),
    };
    output::section(&format!(
        "Sync {} → {} ({}, {} → {})",
        from,
        to,
        project.display_name(),
        plan.target.keyway_environment,
        plan.target.provider_environment
    ));

    output::changes(Change::Added, &plan.preview.to_create);
    output::changes(Change::Changed, &plan.preview.to_update);
    output::changes(Change::Removed, &plan.preview.to_delete);
    println!();
    output::dimmed(&format!(
        "{} to create, {} to update, {} to delete, {} unchanged",
        plan.preview.to_create.len(),
        plan.preview.to_update.len(),
        plan.preview.to_delete.len(),
        plan.preview.to_skip.len()
    ));

    let kept = match plan.direction {
        Direction::Push if !plan.allow_delete => plan.diff.only_in_provider.len(),
        _ => 0,
    };
    if kept > 0 {
        output::dimmed(&format!(
            "{} only on {} left untouched (use --allow-delete to remove)",
            output::plural(kept, "secret"),
            provider
        ));
    }
}
