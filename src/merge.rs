use std::collections::HashMap;

use crate::model::Entry;

/// Merged key/value pairs, iterated in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<(String, String)>,
    by_key: HashMap<String, usize>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|idx| self.entries[*idx].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Insert `value` under `key`. An existing key is only replaced when
    /// `overwrite` is set, and keeps its original position.
    ///
    /// Returns whether the map changed.
    pub fn insert(&mut self, key: String, value: String, overwrite: bool) -> bool {
        if let Some(idx) = self.by_key.get(&key).copied() {
            if !overwrite {
                return false;
            }
            self.entries[idx].1 = value;
            return true;
        }

        self.by_key.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        true
    }
}

impl IntoIterator for EnvMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Combine parsed files, in order, into one map.
///
/// A key seen again replaces the earlier value only when
/// `overwrite_existing` is set; otherwise the first value wins.
pub fn merge<I>(files: I, overwrite_existing: bool) -> EnvMap
where
    I: IntoIterator<Item = Vec<Entry>>,
{
    let mut map = EnvMap::new();
    for entries in files {
        for entry in entries {
            if !map.insert(entry.key, entry.value, overwrite_existing) {
                tracing::trace!(line = entry.line, "keeping first value for duplicate key");
            }
        }
    }
    map
}
