//! Set-intersection differences and deterministic ranking.

use pfc_core::{DiffRecord, MeasurementMap};

/// One record per key present in both tables, in `baseline` order.
pub fn abs_diff(baseline: &MeasurementMap, candidate: &MeasurementMap) -> Vec<DiffRecord> {
    baseline
        .iter()
        .filter_map(|(key, base)| {
            candidate
                .get(key)
                .map(|value| DiffRecord::new(key.clone(), *base, *value))
        })
        .collect()
}

/// Sort ascending by difference. The sort is stable and keyed only on the
/// difference, so equal differences keep their incoming order.
pub fn rank(mut records: Vec<DiffRecord>) -> Vec<DiffRecord> {
    records.sort_by(|a, b| a.diff.total_cmp(&b.diff));
    records
}

/// [`abs_diff`] followed by [`rank`].
pub fn ranked_diff(baseline: &MeasurementMap, candidate: &MeasurementMap) -> Vec<DiffRecord> {
    rank(abs_diff(baseline, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfc_core::{EntityId, Phase, VoltageMap};

    fn volts(entries: &[(&str, f64)]) -> VoltageMap {
        entries
            .iter()
            .map(|(bus, v)| (EntityId::bus(bus, Phase::A), *v))
            .collect()
    }

    #[test]
    fn only_common_keys_are_compared() {
        let a = volts(&[("B1", 1.02), ("B2", 0.99)]);
        let b = volts(&[("B1", 1.03), ("B3", 1.0)]);
        let diffs = abs_diff(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].key, EntityId::bus("B1", Phase::A));
        assert!((diffs[0].diff - 0.01).abs() < 1e-12);
    }

    #[test]
    fn difference_is_symmetric() {
        let a = volts(&[("B1", 1.02), ("B2", 0.95)]);
        let b = volts(&[("B1", 1.07), ("B2", 0.97)]);
        let ab = abs_diff(&a, &b);
        let ba = abs_diff(&b, &a);
        for (x, y) in ab.iter().zip(&ba) {
            assert_eq!(x.key, y.key);
            assert_eq!(x.diff, y.diff);
        }
    }

    #[test]
    fn rank_is_ascending() {
        let a = volts(&[("B1", 1.0), ("B2", 1.0), ("B3", 1.0)]);
        let b = volts(&[("B1", 1.3), ("B2", 1.1), ("B3", 1.2)]);
        let names: Vec<String> = ranked_diff(&a, &b)
            .iter()
            .map(|r| r.key.name().to_string())
            .collect();
        assert_eq!(names, vec!["B2", "B3", "B1"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let a = volts(&[("Z", 1.0), ("M", 1.0), ("A", 1.0), ("Q", 1.0)]);
        let b = volts(&[("A", 1.5), ("Q", 1.25), ("M", 1.5), ("Z", 1.5)]);
        let names: Vec<String> = ranked_diff(&a, &b)
            .iter()
            .map(|r| r.key.name().to_string())
            .collect();
        assert_eq!(names, vec!["Q", "Z", "M", "A"]);
    }
}
