//! Diff type.
//!
//! Classifies every key of two secret sets as added, removed, changed, or
//! unchanged, from the point of view of moving `source` onto `target`.

use super::SecretSet;

/// The classification of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Present in source, absent in target.
    Added,
    /// Present in target, absent in source.
    Removed,
    /// Present in both, values differ.
    Changed,
    /// Present in both with the same value.
    Same,
}

/// A single entry in a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    key: String,
    status: EntryStatus,
}

impl DiffEntry {
    /// Create a new diff entry.
    pub fn new(key: String, status: EntryStatus) -> Self {
        Self { key, status }
    }

    /// The secret key name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The classification.
    pub fn status(&self) -> EntryStatus {
        self.status
    }
}

/// The difference between a source and a target set.
///
/// The four lists are disjoint, each sorted by key, and together cover
/// every key of both sets exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<String>,
    pub same: Vec<String>,
}

impl Diff {
    /// Compute the diff of moving `source` onto `target`.
    pub fn compute(source: &SecretSet, target: &SecretSet) -> Self {
        let mut diff = Self::default();

        // Both sets iterate in key order, so every list comes out sorted.
        for (key, value) in source.iter() {
            match target.get(key) {
                None => diff.added.push(key.to_string()),
                Some(other) if other == value => diff.same.push(key.to_string()),
                Some(_) => diff.changed.push(key.to_string()),
            }
        }

        for key in target.keys() {
            if !source.contains_key(key) {
                diff.removed.push(key.to_string());
            }
        }

        diff
    }

    /// All entries merged into one list sorted by key.
    pub fn entries(&self) -> Vec<DiffEntry> {
        let mut entries: Vec<DiffEntry> = [
            (&self.added, EntryStatus::Added),
            (&self.removed, EntryStatus::Removed),
            (&self.changed, EntryStatus::Changed),
            (&self.same, EntryStatus::Same),
        ]
        .into_iter()
        .flat_map(|(keys, status)| keys.iter().map(move |k| DiffEntry::new(k.clone(), status)))
        .collect();

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    /// Status of a key, if it belongs to either set.
    pub fn status_of(&self, key: &str) -> Option<EntryStatus> {
        let has = |list: &Vec<String>| list.binary_search_by(|k| k.as_str().cmp(key)).is_ok();

        if has(&self.added) {
            Some(EntryStatus::Added)
        } else if has(&self.removed) {
            Some(EntryStatus::Removed)
        } else if has(&self.changed) {
            Some(EntryStatus::Changed)
        } else if has(&self.same) {
            Some(EntryStatus::Same)
        } else {
            None
        }
    }

    /// Whether the two sets are identical.
    pub fn is_in_sync(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of keys across both sets.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len() + self.same.len()
    }

    /// Whether both sets were empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
