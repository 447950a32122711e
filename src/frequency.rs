//! Insertion-ordered frequency table.
//!
//! Used for word and emoji histograms. Sorting is stable, so entries with
//! equal counts keep their first-encountered order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One `(key, count)` entry of a sorted frequency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub key: String,
    pub count: usize,
}

/// Counts occurrences of string keys, remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `key`.
    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    /// Adds `n` to the count for `key`.
    pub fn add_n(&mut self, key: &str, n: usize) {
        if let Some(&pos) = self.positions.get(key) {
            self.entries[pos].1 += n;
        } else {
            self.positions.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), n));
        }
    }

    /// Returns the count for `key`, 0 if never seen.
    pub fn get(&self, key: &str) -> usize {
        self.positions
            .get(key)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Keys in first-encountered order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// All entries sorted by count descending, ties in first-encountered order.
    pub fn sorted(&self) -> Vec<Count> {
        let mut out: Vec<Count> = self
            .entries
            .iter()
            .map(|(key, count)| Count {
                key: key.clone(),
                count: *count,
            })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> Vec<Count> {
        let mut sorted = self.sorted();
        sorted.truncate(n);
        sorted
    }

    /// Merges another table into this one, appending unseen keys in its order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (key, count) in &other.entries {
            self.add_n(key, *count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut table = FrequencyTable::new();
        for word in ["love", "cats", "love", "dogs", "cats", "and", "dogs"] {
            table.add(word);
        }
        let keys: Vec<String> = table.sorted().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, ["love", "cats", "dogs", "and"]);
    }

    #[test]
    fn test_top_truncates() {
        let mut table = FrequencyTable::new();
        table.add_n("a", 3);
        table.add_n("b", 5);
        table.add("c");
        let top = table.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "b");
        assert_eq!(table.total(), 9);
        assert_eq!(table.get("zzz"), 0);
    }

    #[test]
    fn test_merge() {
        let mut a = FrequencyTable::new();
        a.add("x");
        let mut b = FrequencyTable::new();
        b.add("y");
        b.add("x");
        a.merge(&b);
        assert_eq!(a.get("x"), 2);
        assert_eq!(a.keys().collect::<Vec<_>>(), ["x", "y"]);
    }
}
