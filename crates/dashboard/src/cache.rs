use std::collections::HashMap;
use std::hash::Hash;

use common::Result;

/// Unbounded memo table keyed on the full input tuple.
///
/// The session owns one table per process, so the key space stays small and
/// entries are never evicted. Failed computations are not stored; the next
/// identical call recomputes.
#[derive(Debug)]
pub(crate) struct Memo<K, V> {
    entries: HashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Fetch the cached value, or compute, store and return it.
    pub fn get_or_try_insert_with<F>(&mut self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(value.clone());
        }
        let value = compute()?;
        self.misses += 1;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
