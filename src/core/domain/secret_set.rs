//! SecretSet type.
//!
//! An ordered key/value mapping of secrets. Iteration is always sorted by
//! key, which is what makes serialized output deterministic.

use std::collections::BTreeMap;

use crate::core::codec;
use crate::error::ValidationError;

/// A named set of secrets.
///
/// A key with an empty value is a valid secret; it is not the same as the
/// key being absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSet {
    entries: BTreeMap<String, String>,
}

impl SecretSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse env-file text into a set.
    pub fn parse(text: &str) -> Self {
        codec::parse(text)
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present (regardless of value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Build a set from key/value pairs, rejecting any key the env-file
    /// format cannot hold. Later duplicates replace earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.insert(key, value)?;
        }
        Ok(set)
    }

    /// Check that a key survives a serialize/parse round trip.
    ///
    /// Rejected: empty keys, keys containing `=` or a line break, keys
    /// starting with `#`, and keys with leading or trailing whitespace.
    pub fn validate_key(key: &str) -> Result<(), ValidationError> {
        let valid = !key.is_empty()
            && key.trim() == key
            && !key.starts_with('#')
            && !key.contains(['=', '\n']);

        if valid {
            Ok(())
        } else {
            Err(ValidationError::InvalidKey(key.to_string()))
        }
    }

    /// Insert or replace a secret, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidKey` if the key fails
    /// [`validate_key`](Self::validate_key); the set is left unchanged.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, ValidationError> {
        let key = key.into();
        Self::validate_key(&key)?;
        Ok(self.entries.insert(key, value.into()))
    }

    // The parser only yields keys that already pass `validate_key`.
    pub(crate) fn insert_parsed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Remove a secret, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of secrets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` on top of this set; `other` wins on conflicts.
    pub fn overlay(&mut self, other: &SecretSet) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Serialize to env-file text (sorted, trailing newline).
    pub fn to_env_string(&self) -> String {
        codec::serialize(self)
    }
}

impl<'a> IntoIterator for &'a SecretSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for SecretSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_env_string())
    }
}
