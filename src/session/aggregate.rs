//! Insertion-ordered duration totals.

use std::collections::HashMap;

/// Durations summed per source key, remembering the order in which each
/// key was first seen.
///
/// Keys are never removed, so the iteration order is fixed once a key has
/// been added.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Keys and their running totals, in first-seen order.
    entries: Vec<(String, i64)>,
    /// Position of each key in `entries`.
    index: HashMap<String, usize>,
}

impl Aggregate {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `seconds` (possibly negative) to the total for `key`.
    pub fn add(&mut self, key: String, seconds: i64) {
        if let Some(&position) = self.index.get(&key) {
            let total = &mut self.entries[position].1;
            *total = total.saturating_add(seconds);
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, seconds));
        }
    }

    /// Total for `key`, if it has been seen.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    /// Iterate over `(key, total_seconds)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries
            .iter()
            .map(|(key, total)| (key.as_str(), *total))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been added yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
