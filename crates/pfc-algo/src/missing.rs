//! Missing-entity detection between two tables of the same quantity.

use std::hash::Hash;

use pfc_core::{MeasurementMap, MissingReport};

/// Keys present on one side only, listed in each table's own order.
pub fn missing_entities<K, V>(first: &MeasurementMap<K, V>, second: &MeasurementMap<K, V>) -> MissingReport<K>
where
    K: Eq + Hash + Clone,
{
    let only_in = |a: &MeasurementMap<K, V>, b: &MeasurementMap<K, V>| -> Vec<K> {
        a.keys().filter(|k| !b.contains_key(k)).cloned().collect()
    };
    MissingReport {
        first_total: first.len(),
        second_total: second.len(),
        not_in_second: only_in(first, second),
        not_in_first: only_in(second, first),
    }
}
