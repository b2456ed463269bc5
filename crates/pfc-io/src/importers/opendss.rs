//! Loaders for circuit-analysis (OpenDSS style) result exports.
//!
//! The baseline and solver-A directories share this layout: comma-delimited,
//! one header row, quoted element names, and a space after each delimiter.
//!
//! | file | row shape |
//! |------|-----------|
//! | `_v.csv` | bus, base kV, then 3 x (node, magnitude, angle, p.u.) |
//! | `_i.csv` | element, 4 x (magnitude, angle), residual magnitude/angle, ... |
//! | `_t.csv` | regulator, tap, min, max, step, position |
//! | `_s.csv` | 23 run diagnostics; the last row is the final state |

use std::path::Path;

use pfc_core::{CurrentMap, EntityId, Phase, PfcResult, RunSummary, TapMap, VoltageMap};
use tracing::debug;

use crate::schema::{decode_rows, Field, Loaded, RowSchema};

/// Phases whose magnitude does not exceed this many amperes are treated as
/// absent conductors rather than measured zeros.
pub const DSS_CURRENT_TOLERANCE: f64 = 1.0e-8;

pub const VOLTAGE_SCHEMA: RowSchema = RowSchema {
    name: "dss-voltages",
    header_rows: 1,
    key_column: Some(0),
    fields: &[
        Field::text("bus", 0),
        Field::float("base_kv", 1),
        Field::integer("node1", 2),
        Field::float("magnitude1", 3),
        Field::float("angle1", 4),
        Field::float("pu1", 5),
        Field::integer("node2", 6),
        Field::float("magnitude2", 7),
        Field::float("angle2", 8),
        Field::float("pu2", 9),
        Field::integer("node3", 10),
        Field::float("magnitude3", 11),
        Field::float("angle3", 12),
        Field::float("pu3", 13),
    ],
};

const VOLTAGE_GROUPS: [(&str, &str); 3] = [("node1", "pu1"), ("node2", "pu2"), ("node3", "pu3")];

pub const CURRENT_SCHEMA: RowSchema = RowSchema {
    name: "dss-currents",
    header_rows: 1,
    key_column: None,
    fields: &[
        Field::text("element", 0),
        Field::float("i1", 1),
        Field::float("ang1", 2),
        Field::float("i2", 3),
        Field::float("ang2", 4),
        Field::float("i3", 5),
        Field::float("ang3", 6),
        Field::float("i4", 7),
        Field::float("ang4", 8),
        Field::float("iresid", 9),
        Field::float("angresid", 10),
    ],
};

const CURRENT_PHASES: [&str; 3] = ["i1", "i2", "i3"];

pub const TAP_SCHEMA: RowSchema = RowSchema {
    name: "dss-taps",
    header_rows: 1,
    key_column: Some(0),
    fields: &[
        Field::text("name", 0),
        Field::float("tap", 1),
        Field::float("min", 2),
        Field::float("max", 3),
        Field::float("step", 4),
        Field::integer("position", 5),
    ],
};

pub const SUMMARY_SCHEMA: RowSchema = RowSchema {
    name: "dss-summary",
    header_rows: 1,
    key_column: None,
    fields: &[
        Field::text("DateTime", 0),
        Field::text("CaseName", 1),
        Field::text("Status", 2),
        Field::text("Mode", 3),
        Field::text("Number", 4),
        Field::text("LoadMult", 5),
        Field::text("NumDevices", 6),
        Field::text("NumBuses", 7),
        Field::text("NumNodes", 8),
        Field::text("Iterations", 9),
        Field::text("ControlMode", 10),
        Field::text("ControlIterations", 11),
        Field::text("MostIterationsDone", 12),
        Field::text("Year", 13),
        Field::text("Hour", 14),
        Field::text("MaxPuVoltage", 15),
        Field::text("MinPuVoltage", 16),
        Field::text("TotalMW", 17),
        Field::text("TotalMvar", 18),
        Field::text("MWLosses", 19),
        Field::text("pctLosses", 20),
        Field::text("MvarLosses", 21),
        Field::text("Frequency", 22),
    ],
};

/// Per-unit bus voltages keyed `BUS_PHASE`. Phases with a non-positive
/// per-unit value are left out rather than stored as zero.
pub fn load_voltages(path: &Path) -> PfcResult<Loaded<VoltageMap>> {
    let loaded = decode_rows(path, &VOLTAGE_SCHEMA, VoltageMap::new(), |map, rec| {
        let bus = rec.text("bus")?;
        let mut groups = [("", 0.0); 3];
        for (slot, (node, pu)) in groups.iter_mut().zip(VOLTAGE_GROUPS) {
            *slot = (node, rec.float(pu)?);
        }
        for (node, value) in groups {
            if value > 0.0 {
                let phase = Phase::from_node_index(rec.integer(node)?);
                map.insert(EntityId::bus(bus, phase), value);
            }
        }
        Ok(())
    })?;
    debug!(path = %path.display(), outcome = loaded.label(), "loaded voltages");
    Ok(loaded)
}

/// Branch current magnitudes keyed `CLASS.NAME.<ordinal>`, where the ordinal
/// counts only the conductors above [`DSS_CURRENT_TOLERANCE`].
pub fn load_currents(path: &Path) -> PfcResult<Loaded<CurrentMap>> {
    let loaded = decode_rows(path, &CURRENT_SCHEMA, CurrentMap::new(), |map, rec| {
        let element = rec.text("element")?;
        let mut mags = [0.0; 3];
        for (slot, field) in mags.iter_mut().zip(CURRENT_PHASES) {
            *slot = rec.float(field)?;
        }
        let mut ordinal = 1;
        for mag in mags {
            if mag > DSS_CURRENT_TOLERANCE {
                map.insert(EntityId::branch(element, ordinal), mag);
                ordinal += 1;
            }
        }
        Ok(())
    })?;
    debug!(path = %path.display(), outcome = loaded.label(), "loaded currents");
    Ok(loaded)
}

/// Regulator tap positions keyed by upper-case regulator name.
pub fn load_taps(path: &Path) -> PfcResult<Loaded<TapMap>> {
    let loaded = decode_rows(path, &TAP_SCHEMA, TapMap::new(), |map, rec| {
        let name = pfc_core::canonical_name(rec.text("name")?);
        map.insert(name, rec.integer("position")?);
        Ok(())
    })?;
    debug!(path = %path.display(), outcome = loaded.label(), "loaded taps");
    Ok(loaded)
}

/// Run diagnostics from the last row of the summary export.
pub fn load_summary(path: &Path) -> PfcResult<Loaded<RunSummary>> {
    let loaded = decode_rows(path, &SUMMARY_SCHEMA, RunSummary::new(), |summary, rec| {
        for key in pfc_core::SUMMARY_KEYS {
            summary.set(key, rec.text(key)?);
        }
        Ok(())
    })?;
    debug!(path = %path.display(), outcome = loaded.label(), "loaded run summary");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfc_core::PfcError;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const V_HEADER: &str = "Bus, BasekV, Node1, Magnitude1, Angle1, pu1, Node2, Magnitude2, Angle2, pu2, Node3, Magnitude3, Angle3, pu3\n";
    const I_HEADER: &str = "Element, I1_1, Ang1_1, I1_2, Ang1_2, I1_3, Ang1_3, I1_4, Ang1_4, Iresid1, AngResid1\n";

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn voltages_keyed_by_node_phase() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "v.csv",
            &format!(
                "{V_HEADER}\"650\", 4.16, 1, 2520.6, 0.0, 1.05, 2, 2520.5, -120.0, 1.0498, 3, 2520.7, 120.0, 1.0501\n\
                 \"684\", 4.16, 1, 2400.0, -5.0, 0.9992, 3, 2390.0, 115.0, 0.9950, 0, 0, 0, 0\n"
            ),
        );
        let map = load_voltages(&path).unwrap().into_inner();
        assert_eq!(map.len(), 5);
        assert_eq!(map.get(&EntityId::bus("650", Phase::B)), Some(&1.0498));
        assert_eq!(map.get(&EntityId::bus("684", Phase::C)), Some(&0.9950));
        assert!(!map.contains_key(&EntityId::bus("684", Phase::B)));
    }

    #[test]
    fn all_zero_voltages_yield_empty_map() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "v.csv",
            &format!("{V_HEADER}\"X\", 4.16, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0\n"),
        );
        let loaded = load_voltages(&path).unwrap();
        assert!(matches!(loaded, Loaded::Present(ref m) if m.is_empty()));
    }

    #[test]
    fn current_tolerance_filters_near_zero_phases() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "i.csv",
            &format!(
                "{I_HEADER}\"Line.A\", 1e-9, 0, 1e-7, 0, 0, 0, 0, 0, 0, 0\n\
                 \"Line.B\", 12.5, 0, 0, 0, 11.0, 0, 0, 0, 0, 0\n"
            ),
        );
        let map = load_currents(&path).unwrap().into_inner();
        assert_eq!(map.get(&EntityId::branch("LINE.A", 1)), Some(&1e-7));
        assert!(!map.contains_key(&EntityId::branch("LINE.A", 2)));
        assert_eq!(map.get(&EntityId::branch("LINE.B", 1)), Some(&12.5));
        assert_eq!(map.get(&EntityId::branch("LINE.B", 2)), Some(&11.0));
        assert!(!map.contains_key(&EntityId::branch("LINE.B", 3)));
    }

    #[test]
    fn malformed_current_is_fatal() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "i.csv",
            &format!("{I_HEADER}\"Line.A\", 1.0, 0, x, 0, 0, 0, 0, 0, 0, 0\n"),
        );
        assert!(matches!(load_currents(&path), Err(PfcError::Parse { .. })));
    }

    #[test]
    fn taps_read_position_column() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "t.csv",
            "Name, Tap, Min, Max, Step, Position\n\"reg1\", 1.0125, 0.9, 1.1, 0.00625, 2\n\"Reg2\", 1.0, 0.9, 1.1, 0.00625, -3\n",
        );
        let taps = load_taps(&path).unwrap().into_inner();
        assert_eq!(taps.get(&"REG1".to_string()), Some(&2));
        assert_eq!(taps.get(&"REG2".to_string()), Some(&-3));
    }

    #[test]
    fn summary_keeps_last_row() {
        let dir = tempdir().unwrap();
        let row = |status: &str| {
            let mut cols: Vec<String> = (0..23).map(|i| format!("c{i}")).collect();
            cols[2] = status.to_string();
            cols.join(", ")
        };
        let path = write(
            &dir,
            "s.csv",
            &format!("header\n{}\n{}\n", row("UNSOLVED"), row("SOLVED")),
        );
        let summary = load_summary(&path).unwrap().into_inner();
        assert_eq!(summary.get("Status"), Some("SOLVED"));
        assert_eq!(summary.get("Frequency"), Some("c22"));
        assert_eq!(summary.get("MaxPuVoltage"), Some("c15"));
    }

    #[test]
    fn missing_files_are_not_errors() {
        let dir = tempdir().unwrap();
        assert!(load_voltages(&dir.path().join("a")).unwrap().is_missing());
        assert!(load_currents(&dir.path().join("b")).unwrap().is_missing());
        assert!(load_taps(&dir.path().join("c")).unwrap().is_missing());
        assert!(load_summary(&dir.path().join("d")).unwrap().is_missing());
    }
}
