//! Keyway - keep .env files, the vault, and deployment providers in sync.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyway::cli::output;
use keyway::cli::{execute, Cli};
use keyway::core::constants;
use keyway::error::{ApiError, AuthError, ConfigError, Error, SyncError, ValidationError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keyway=debug")
        } else {
            EnvFilter::new("keyway=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Auth(
            AuthError::NotLoggedIn | AuthError::LoginRequired | AuthError::InvalidToken,
        ) => Some("run: keyway login".into()),
        Error::Api(ApiError::Unauthorized) => Some("run: keyway login".into()),
        Error::Api(ApiError::PlanLimit {
            upgrade_url: Some(url),
            ..
        }) => Some(format!("upgrade: {}", url)),
        Error::Config(ConfigError::NoRemote | ConfigError::GitNotFound) => {
            Some("pass --repo owner/name".into())
        }
        Error::Config(ConfigError::EnvFileNotFound(_)) => Some("run: keyway pull".into()),
        Error::Validation(ValidationError::ConfirmationRequired(_)) => {
            Some("pass --yes to confirm".into())
        }
        Error::Sync(SyncError::AmbiguousProject { .. } | SyncError::NoProjectMatch { .. }) => {
            Some("pass --project <id or name>".into())
        }
        _ => None,
    }
}
