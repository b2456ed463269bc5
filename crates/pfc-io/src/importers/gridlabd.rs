//! Loaders for time-domain distribution simulator (GridLAB-D style) recorder
//! exports.
//!
//! Voltages come out in volts line-to-neutral behind two header rows and are
//! converted to per-unit here. Currents come out in amperes behind one header
//! row, for every link in the model; only lines, regulators, switches and
//! transformers are kept.

use std::path::Path;

use pfc_core::units::{normalize_voltage, Volts};
use pfc_core::{CurrentMap, EntityId, LinkPrefix, Phase, PfcResult, VoltageMap};
use tracing::debug;

use crate::schema::{decode_rows, Field, Loaded, RowSchema};

/// Link phases carrying no more than this many amperes are left out.
pub const GLM_CURRENT_TOLERANCE: f64 = 0.001;

pub const VOLTAGE_SCHEMA: RowSchema = RowSchema {
    name: "glm-voltages",
    header_rows: 2,
    key_column: None,
    fields: &[
        Field::text("node_name", 0),
        Field::float("voltA_mag", 1),
        Field::float("voltA_angle", 2),
        Field::float("voltB_mag", 3),
        Field::float("voltB_angle", 4),
        Field::float("voltC_mag", 5),
        Field::float("voltC_angle", 6),
    ],
};

const VOLTAGE_PHASES: [(Phase, &str); 3] = [
    (Phase::A, "voltA_mag"),
    (Phase::B, "voltB_mag"),
    (Phase::C, "voltC_mag"),
];

pub const CURRENT_SCHEMA: RowSchema = RowSchema {
    name: "glm-currents",
    header_rows: 1,
    key_column: None,
    fields: &[
        Field::text("link_name", 0),
        Field::float("currA_mag", 1),
        Field::float("currA_angle", 2),
        Field::float("currB_mag", 3),
        Field::float("currB_angle", 4),
        Field::float("currC_mag", 5),
        Field::float("currC_angle", 6),
    ],
};

const CURRENT_PHASES: [(Phase, &str); 3] = [
    (Phase::A, "currA_mag"),
    (Phase::B, "currB_mag"),
    (Phase::C, "currC_mag"),
];

/// Solver-B bus voltages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlmVoltages {
    /// Every bus name in file order, including buses with no voltage.
    pub buses: Vec<String>,
    /// Per-unit voltages keyed `BUS_PHASE`.
    pub voltages: VoltageMap,
    /// Keys whose magnitude no candidate base could normalize; they are
    /// still present in `voltages` with the 0.0 sentinel.
    pub unresolved: Vec<EntityId>,
}

/// Solver-B link currents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlmCurrents {
    /// Names of the links of interest in file order.
    pub links: Vec<String>,
    /// Ampere magnitudes keyed `PREFIX_NAME_PHASE`.
    pub currents: CurrentMap,
}

/// Load voltages, normalizing each positive magnitude against the
/// line-to-neutral candidate bases of the case.
pub fn load_voltages(path: &Path, bases_ln: &[Volts]) -> PfcResult<Loaded<GlmVoltages>> {
    let loaded = decode_rows(path, &VOLTAGE_SCHEMA, GlmVoltages::default(), |out, rec| {
        let bus = pfc_core::canonical_name(rec.text("node_name")?);
        for (phase, field) in VOLTAGE_PHASES {
            let magnitude = rec.float(field)?;
            if magnitude > 0.0 {
                let key = EntityId::bus(&bus, phase);
                let pu = normalize_voltage(Volts(magnitude), bases_ln);
                if pu.is_unresolved() {
                    out.unresolved.push(key.clone());
                }
                out.voltages.insert(key, pu.value());
            }
        }
        out.buses.push(bus);
        Ok(())
    })?;
    debug!(path = %path.display(), outcome = loaded.label(), "loaded solver-B voltages");
    Ok(loaded)
}

/// Load currents of links whose name starts with a known [`LinkPrefix`].
pub fn load_currents(path: &Path) -> PfcResult<Loaded<GlmCurrents>> {
    let loaded = decode_rows(path, &CURRENT_SCHEMA, GlmCurrents::default(), |out, rec| {
        let link = pfc_core::canonical_name(rec.text("link_name")?);
        if LinkPrefix::split(&link).is_none() {
            return Ok(());
        }
        for (phase, field) in CURRENT_PHASES {
            let magnitude = rec.float(field)?;
            if magnitude > GLM_CURRENT_TOLERANCE {
                out.currents.insert(EntityId::link(&link, phase), magnitude);
            }
        }
        out.links.push(link);
        Ok(())
    })?;
    debug!(path = %path.display(), outcome = loaded.label(), "loaded solver-B currents");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const V_HEADER: &str = "# timestamp,2000-01-01 00:00:00\nnode_name,voltA_mag,voltA_angle,voltB_mag,voltB_angle,voltC_mag,voltC_angle\n";
    const I_HEADER: &str =
        "link_name,currA_mag,currA_angle,currB_mag,currB_angle,currC_mag,currC_angle\n";

    fn bases() -> Vec<Volts> {
        [480.0, 4160.0]
            .iter()
            .map(|v| Volts(*v).line_to_neutral())
            .collect()
    }

    #[test]
    fn voltages_are_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("IEEE13_volt.csv");
        fs::write(
            &path,
            format!("{V_HEADER}n650,2450.0,0,2401.8,-120,0,0\nn671,121.0,0,0,0,0,0\n"),
        )
        .unwrap();
        let out = load_voltages(&path, &bases()).unwrap().into_inner();
        assert_eq!(out.buses, vec!["N650", "N671"]);
        assert_eq!(out.voltages.len(), 3);
        let a = out.voltages.get(&EntityId::bus("N650", Phase::A)).unwrap();
        assert!((a - 2450.0 / (4160.0 / 3f64.sqrt())).abs() < 1e-9);
        let small = out.voltages.get(&EntityId::bus("N671", Phase::A)).unwrap();
        assert!((small - 121.0 / 120.0).abs() < 1e-12);
        assert!(!out.voltages.contains_key(&EntityId::bus("N650", Phase::C)));
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn unresolvable_voltage_keeps_sentinel() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x_volt.csv");
        fs::write(&path, format!("{V_HEADER}sourcebus,66395.3,0,0,0,0,0\n")).unwrap();
        let out = load_voltages(&path, &bases()).unwrap().into_inner();
        let key = EntityId::bus("SOURCEBUS", Phase::A);
        assert_eq!(out.voltages.get(&key), Some(&0.0));
        assert_eq!(out.unresolved, vec![key]);
    }

    #[test]
    fn only_prefixed_links_are_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x_curr.csv");
        fs::write(
            &path,
            format!(
                "{I_HEADER}line_632670,480.2,-30,0.0005,0,470.1,90\n\
                 load_671,bogus,0,0,0,0,0\n\
                 xf_xfm1,60.5,0,61.0,0,0,0\n"
            ),
        )
        .unwrap();
        let out = load_currents(&path).unwrap().into_inner();
        assert_eq!(out.links, vec!["LINE_632670", "XF_XFM1"]);
        assert_eq!(
            out.currents.get(&EntityId::link("LINE_632670", Phase::A)),
            Some(&480.2)
        );
        assert!(!out
            .currents
            .contains_key(&EntityId::link("LINE_632670", Phase::B)));
        assert_eq!(out.currents.len(), 4);
    }

    #[test]
    fn header_rows_only_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x_volt.csv");
        fs::write(&path, V_HEADER).unwrap();
        assert_eq!(load_voltages(&path, &[]).unwrap(), Loaded::Empty);
    }
}
