//! Per-agent diagnostic output produced in benchmark mode.

use indexmap::IndexMap;

/// Named diagnostic values for one agent at one step.
///
/// Scenarios that support benchmarking fill this with evaluation metrics
/// (collision counts, distances to goals, reward terms). Insertion order
/// is preserved so tabular output stays stable across runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenchmarkData {
    entries: IndexMap<String, f32>,
}

impl BenchmarkData {
    /// Empty diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: f32) {
        self.entries.insert(key.into(), value);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: f32) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.entries.get(key).copied()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let data = BenchmarkData::new()
            .with("reward", -1.5)
            .with("collisions", 2.0)
            .with("min_dists", 0.3);
        let keys: Vec<&str> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["reward", "collisions", "min_dists"]);
        assert_eq!(data.get("collisions"), Some(2.0));
        assert_eq!(data.get("missing"), None);
    }

    #[test]
    fn insert_replaces() {
        let mut data = BenchmarkData::new();
        data.insert("x", 1.0);
        data.insert("x", 2.0);
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("x"), Some(2.0));
    }
}
