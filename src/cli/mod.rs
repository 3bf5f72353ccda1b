//! Command-line interface.

pub mod completions;
pub mod context;
pub mod diff;
pub mod login;
pub mod logout;
pub mod output;
pub mod prompt;
pub mod pull;
pub mod push;
pub mod sync;
pub mod whoami;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants;
use crate::error::Result;

pub use context::Context;

/// Keyway - keep .env files, the vault, and deployment providers in sync.
#[derive(Parser)]
#[command(
    name = "keyway",
    about = "Keep .env files, the Keyway vault, and deployment providers in sync",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Vault API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Repository as owner/name (default: detected from git)
    #[arg(long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by commands that touch a vault environment and a local file.
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Vault environment (default: development)
    #[arg(short, long, value_name = "NAME")]
    pub env: Option<String>,

    /// Local env file
    #[arg(short, long, default_value = constants::ENV_FILE)]
    pub file: PathBuf,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Log in to Keyway
    Login {
        /// Use a personal access token instead of the browser flow
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
    },

    /// Forget the stored credential
    Logout,

    /// Show who you are logged in as
    Whoami,

    /// Upload the local env file to the vault
    Push {
        #[command(flatten)]
        target: FileArgs,

        /// Delete vault secrets missing from the local file
        #[arg(long)]
        prune: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Download vault secrets into the local env file
    Pull {
        #[command(flatten)]
        target: FileArgs,

        /// Replace the local file instead of merging into it
        #[arg(long)]
        force: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Compare the local env file with the vault
    Diff {
        #[command(flatten)]
        target: FileArgs,
    },

    /// Sync vault secrets with a deployment provider
    Sync {
        /// Provider name (e.g. vercel, railway)
        provider: String,

        /// Provider project id or name (default: matched from the repository)
        #[arg(long, value_name = "PROJECT")]
        project: Option<String>,

        /// Vault environment (default: development)
        #[arg(short, long, value_name = "NAME")]
        env: Option<String>,

        /// Provider environment (default: same as --env)
        #[arg(long, value_name = "NAME")]
        provider_env: Option<String>,

        /// Import from the provider into the vault
        #[arg(long)]
        pull: bool,

        /// Delete provider secrets missing from the vault (push only)
        #[arg(long)]
        allow_delete: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Command {
    fn assume_yes(&self) -> bool {
        match self {
            Command::Push { yes, .. } | Command::Pull { yes, .. } | Command::Sync { yes, .. } => {
                *yes
            }
            _ => false,
        }
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns error if the command fails.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    if let Completions { shell } = cli.command {
        return completions::execute(shell);
    }

    let ctx = Context::new(cli.api_url, cli.repo, cli.command.assume_yes())?;

    match cli.command {
        Login { token } => login::execute(&ctx, token),
        Logout => logout::execute(&ctx),
        Whoami => whoami::execute(&ctx),
        Push { target, prune, yes } => push::execute(&ctx, &target, prune, yes),
        Pull { target, force, yes } => pull::execute(&ctx, &target, force, yes),
        Diff { target } => diff::execute(&ctx, &target),
        Sync {
            provider,
            project,
            env,
            provider_env,
            pull,
            allow_delete,
            yes,
        } => sync::execute(
            &ctx,
            &sync::SyncArgs {
                provider,
                project,
                env,
                provider_env,
                pull,
                allow_delete,
                yes,
            },
        ),
        Completions { .. } => Ok(()),
    }
}
