//! Interactive prompts.
//!
//! Every prompt has a non-interactive answer: `--yes` approves, and without
//! it a required confirmation is an error rather than a silent default.

use dialoguer::{Confirm, Select};

use crate::error::{Result, ValidationError};

/// Ask before a mutating `action`.
///
/// Returns `true` without asking when `yes` is set.
///
/// # Errors
///
/// Returns `ValidationError::ConfirmationRequired` when neither `yes` nor a
/// terminal is available.
pub fn confirm(question: &str, action: &str, yes: bool, interactive: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !interactive {
        return Err(ValidationError::ConfirmationRequired(action.to_string()).into());
    }

    Ok(Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()?)
}

/// Ask an optional yes/no question. Non-interactive sessions get `default`.
pub fn ask(question: &str, default: bool, interactive: bool) -> Result<bool> {
    if !interactive {
        return Ok(default);
    }

    Ok(Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()?)
}

/// Let the user pick one of `items`. `None` if they cancel.
pub fn select(question: &str, items: &[String]) -> Result<Option<usize>> {
    Ok(Select::new()
        .with_prompt(question)
        .items(items)
        .default(0)
        .interact_opt()?)
}
