//! Monotonic corridor-strength records.
//!
//! A `ReachabilityMap` remembers, per key, the strongest accumulated
//! corridor strength observed so far from the query origin. Corridor
//! strength is the running product of per-link strengths along one
//! explored path. Updates never decrease a stored value, so repeated
//! exploration of weaker routes cannot erode an earlier, stronger one.

use std::collections::HashMap;
use std::hash::Hash;

/// At most one record per key; the stored strength is the maximum ever
/// observed.
#[derive(Debug, Clone)]
pub struct ReachabilityMap<K: Eq + Hash> {
    records: HashMap<K, f64>,
}

impl<K: Eq + Hash> Default for ReachabilityMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> ReachabilityMap<K> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Record `strength` for `key`, keeping the maximum seen so far.
    /// Returns true if the stored value was inserted or raised.
    pub fn upsert_max(&mut self, key: K, strength: f64) -> bool {
        match self.records.get_mut(&key) {
            Some(existing) => {
                if strength > *existing {
                    *existing = strength;
                    true
                } else {
                    false
                }
            }
            None => {
                self.records.insert(key, strength);
                true
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.records.get(key).copied()
    }

    /// Whether `key` is already recorded at `strength` or better.
    pub fn at_least(&self, key: &K, strength: f64) -> bool {
        self.get(key).map_or(false, |s| s >= strength)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.records.iter().map(|(k, v)| (k, *v))
    }

    /// Drain into a plain vector of `(key, strength)` pairs.
    pub fn into_vec(self) -> Vec<(K, f64)> {
        self.records.into_iter().collect()
    }
}
