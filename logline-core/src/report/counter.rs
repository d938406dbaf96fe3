use std::fmt::Display;

/// Insertion-ordered occurrence counter.
///
/// Seeded keys start at zero and stay visible in the output even when never
/// hit. [`Counter::most_common`] sorts by descending count; ties keep the
/// order keys were first seen in.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    entries: Vec<(String, u64)>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: keys.into_iter().map(|key| (key.into(), 0)).collect(),
        }
    }

    /// Count one occurrence of `key`, creating the bucket on first sight.
    pub fn record(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> u64 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Entries by descending count, ties in first-seen order.
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        // sort_by is stable, so equal counts keep insertion order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Counter keyed by string prefixes, modeling status code families.
///
/// The bucket set is fixed at construction. Recording a value increments the
/// first seeded prefix (in seed order) that is a string-prefix of the
/// value's decimal form; values matching no bucket are dropped silently.
#[derive(Debug, Clone)]
pub struct PrefixCounter {
    buckets: Vec<(String, u64)>,
}

impl PrefixCounter {
    pub fn seeded(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            buckets: prefixes.into_iter().map(|p| (p.into(), 0)).collect(),
        }
    }

    /// Bucket one observed value. No-op when no seeded prefix matches.
    pub fn record(&mut self, value: impl Display) {
        let value = value.to_string();
        if let Some((_, count)) = self
            .buckets
            .iter_mut()
            .find(|(prefix, _)| value.starts_with(prefix.as_str()))
        {
            *count += 1;
        }
    }

    pub fn get(&self, prefix: &str) -> u64 {
        self.buckets
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Buckets by descending count, ties in seed order.
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut buckets: Vec<(&str, u64)> = self
            .buckets
            .iter()
            .map(|(prefix, count)| (prefix.as_str(), *count))
            .collect();
        buckets.sort_by(|a, b| b.1.cmp(&a.1));
        buckets
    }
}
