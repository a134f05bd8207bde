use std::collections::HashMap;

/// Counter that remembers the order keys were first seen.
///
/// Ranking is stable: keys with equal counts keep first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: &str, n: u64) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), n));
            }
        }
    }

    /// Count for `key`; zero when never seen.
    pub fn get(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, n)| (key.as_str(), *n))
    }

    /// The `k` highest counts, descending; ties keep insertion order.
    pub fn top_k(&self, k: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(k)
            .map(|(key, n)| (key.clone(), *n))
            .collect()
    }

    /// Every entry, ranked as by [`CountTable::top_k`].
    pub fn most_common(&self) -> Vec<(String, u64)> {
        self.top_k(self.entries.len())
    }
}

impl<S: AsRef<str>> FromIterator<S> for CountTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = CountTable::new();
        table.extend(iter);
        table
    }
}

impl<S: AsRef<str>> Extend<S> for CountTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.increment(key.as_ref());
        }
    }
}
