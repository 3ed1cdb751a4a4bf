//! Run-scoped memoization of matchup results
//!
//! Keys are ordered pairs of normalized entity names. Entries are written
//! once and never replaced or evicted; the whole cache is dropped with the
//! adapter at the end of a run.

use std::collections::BTreeMap;

use crate::types::normalize_name;

/// Ordered, normalized entity pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchupKey {
    pub attacker: String,
    pub defender: String,
}

impl MatchupKey {
    pub fn new(attacker: &str, defender: &str) -> Self {
        Self {
            attacker: normalize_name(attacker),
            defender: normalize_name(defender),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            attacker: self.defender.clone(),
            defender: self.attacker.clone(),
        }
    }

    pub fn is_mirror_match(&self) -> bool {
        self.attacker == self.defender
    }
}

impl std::fmt::Display for MatchupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.attacker, self.defender)
    }
}

/// Write-once map from [`MatchupKey`] to a computed value
#[derive(Debug, Clone)]
pub struct MemoCache<V> {
    entries: BTreeMap<MatchupKey, V>,
}

impl<V> Default for MemoCache<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> MemoCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &MatchupKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &MatchupKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a value unless the key is already present; returns the stored value
    pub fn insert(&mut self, key: MatchupKey, value: V) -> &V {
        self.entries.entry(key).or_insert(value)
    }

    /// Return the cached value, computing it on a miss
    pub fn get_or_insert_with(&mut self, key: MatchupKey, compute: impl FnOnce() -> V) -> &V {
        self.entries.entry(key).or_insert_with(compute)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&MatchupKey, &V)> {
        self.entries.iter()
    }
}
