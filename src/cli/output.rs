//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, added keys
//! - Red: errors, removed keys
//! - Yellow: warnings, changed keys
//! - Cyan: keys, commands, hints
//! - Bold: headers, important values
//! - Dim: secondary info
//!
//! Secret values are never printed, only their keys.

use std::fmt::Display;
use std::io::{self, Write as IoWrite};

use console::style;

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ pushed 4 secrets`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ not logged in`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").for_stderr().red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message (cyan) to stderr, next to the error it explains.
///
/// Example: `→ run: keyway login`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!(
            "{} {}",
            style("→").for_stderr().cyan(),
            style(msg).for_stderr().cyan()
        );
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dim, value bold).
///
/// Example: `  login:  octocat`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a horizontal rule.
pub fn rule() {
    if colors_enabled() {
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Print a dim secondary message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Format a command inline (green).
pub fn cmd(c: &str) -> String {
    if colors_enabled() {
        style(c).green().to_string()
    } else {
        c.to_string()
    }
}

/// How a key is affected, for [`change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
    Changed,
    Unchanged,
}

/// Print one key of a diff or preview with its marker.
///
/// Example: `  + DATABASE_URL`
pub fn change(kind: Change, key: &str) {
    let marker = match kind {
        Change::Added => "+",
        Change::Removed => "-",
        Change::Changed => "~",
        Change::Unchanged => "=",
    };

    if !colors_enabled() {
        println!("  {} {}", marker, key);
        return;
    }

    let line = format!("{} {}", marker, key);
    let styled = match kind {
        Change::Added => style(line).green(),
        Change::Removed => style(line).red(),
        Change::Changed => style(line).yellow(),
        Change::Unchanged => style(line).dim(),
    };
    println!("  {}", styled);
}

/// Print every key in `keys` with the same marker.
pub fn changes(kind: Change, keys: &[String]) {
    for key in keys {
        change(kind, key);
    }
}

/// Start a progress line in the format `Label... `.
///
/// Call `progress_done()` to finish the line.
pub fn progress(label: &str) {
    if colors_enabled() {
        print!("{}... ", style(label).dim());
    } else {
        print!("{}... ", label);
    }
    let _ = io::stdout().flush();
}

/// Finish a progress line with success/failure indicator.
pub fn progress_done(success: bool) {
    let text = if success { "ok" } else { "failed" };
    if !colors_enabled() {
        println!("{}", text);
    } else if success {
        println!("{}", style(text).green());
    } else {
        println!("{}", style(text).red());
    }
}

/// `n thing` or `n things`.
pub fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
