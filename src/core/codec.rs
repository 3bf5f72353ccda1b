//! Env-file text codec.
//!
//! Pure conversion between `KEY=value` text and [`SecretSet`]. No I/O.
//!
//! Parsing rules:
//! - lines are trimmed; blank lines and `#` comments are skipped
//! - a line splits on its first `=`; lines without `=` are ignored
//! - a value wrapped in one matching pair of `"` or `'` loses exactly
//!   that one layer of quotes, with no escape processing
//!
//! Serialization sorts keys and only quotes values that would not survive
//! the parser otherwise.

use crate::core::domain::SecretSet;

/// Parse env-file text into a [`SecretSet`].
///
/// Later duplicates of a key replace earlier ones.
pub fn parse(text: &str) -> SecretSet {
    let mut set = SecretSet::new();
    for (key, value) in entries(text) {
        set.insert_parsed(key, value);
    }
    set
}

/// Serialize a [`SecretSet`] to env-file text.
///
/// One `KEY=value` line per entry, sorted by key, with a trailing newline.
/// An empty set serializes to the empty string.
pub fn serialize(secrets: &SecretSet) -> String {
    let mut output = String::new();
    for (key, value) in secrets.iter() {
        push_line(&mut output, key, value);
    }
    output
}

/// Count the entry lines [`parse`] would read.
///
/// Duplicate keys are counted once per line.
pub fn count_entries(text: &str) -> usize {
    entries(text).count()
}

/// Append a single `KEY=value` line.
pub(crate) fn push_line(output: &mut String, key: &str, value: &str) {
    output.push_str(key);
    output.push('=');
    if needs_quotes(value) {
        output.push('"');
        output.push_str(value);
        output.push('"');
    } else {
        output.push_str(value);
    }
    output.push('\n');
}

fn entries(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        Some((key, unquote(value)))
    })
}

fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

// A value needs quoting when the line trim would eat its edges, or when it
// already looks quoted and the parser would strip a layer.
fn needs_quotes(value: &str) -> bool {
    let edge_whitespace = value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);

    edge_whitespace || unquote(value).len() != value.len()
}
