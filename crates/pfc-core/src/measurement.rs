//! Keyed measurement tables.
//!
//! A [`MeasurementMap`] holds one quantity from one source for one case:
//! per-unit voltages, ampere magnitudes, or regulator tap positions. Keys are
//! unique. Iteration follows first-insert order, which is the file order of
//! the table it was loaded from; re-inserting a key overwrites the value but
//! keeps the original position.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::ids::EntityId;

/// Insertion-ordered map from entity key to a scalar value.
#[derive(Debug, Clone)]
pub struct MeasurementMap<K = EntityId, V = f64> {
    entries: IndexMap<K, V>,
}

impl<K, V> Default for MeasurementMap<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> MeasurementMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insert order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

/// Equal when both hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for MeasurementMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for MeasurementMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Per-unit voltages keyed by bus-phase.
pub type VoltageMap = MeasurementMap<EntityId, f64>;

/// Ampere magnitudes keyed by branch conductor or link phase.
pub type CurrentMap = MeasurementMap<EntityId, f64>;

/// Regulator tap positions keyed by upper-case regulator name.
pub type TapMap = MeasurementMap<String, i64>;
