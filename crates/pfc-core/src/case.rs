//! Test-case catalog entries and the per-run descriptors derived from them.
//!
//! A [`CaseSpec`] is what the catalog stores: a root name and the nominal
//! line-to-line base voltages of the network. It is never modified. Each
//! comparison run calls [`CaseDescriptor::derive`] to get a fresh value with
//! line-to-neutral bases and every file name the run touches, so comparing
//! the same case twice can never convert its bases twice.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::units::Volts;

/// One named test network in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSpec {
    /// Root name used to derive every input and output file name.
    pub root: String,
    /// Candidate base voltages, line-to-line volts, in trial order.
    #[serde(rename = "bases")]
    pub bases_ll: Vec<f64>,
}

impl CaseSpec {
    pub fn new(root: impl Into<String>, bases_ll: &[f64]) -> Self {
        Self {
            root: root.into(),
            bases_ll: bases_ll.to_vec(),
        }
    }
}

/// The three directories a comparison reads from. Reports go to `solver_a`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonDirs {
    /// Baseline result files (solver-A layout).
    pub baseline: PathBuf,
    /// Solver-A result files; also receives every report artifact.
    pub solver_a: PathBuf,
    /// Solver-B result files.
    pub solver_b: PathBuf,
}

impl Default for ComparisonDirs {
    fn default() -> Self {
        Self {
            baseline: PathBuf::from("./test/"),
            solver_a: PathBuf::from("./test/dss/"),
            solver_b: PathBuf::from("./test/glm/"),
        }
    }
}

/// Solver-A style table kinds, one file each per result directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DssTable {
    Voltages,
    Currents,
    Taps,
    Summary,
}

impl DssTable {
    fn suffix(self) -> &'static str {
        match self {
            DssTable::Voltages => "_v.csv",
            DssTable::Currents => "_i.csv",
            DssTable::Taps => "_t.csv",
            DssTable::Summary => "_s.csv",
        }
    }
}

/// Report artifacts written for every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    SummaryLog,
    VoltagesDss,
    VoltagesGlm,
    MissingNodes,
    CurrentsDss,
    CurrentsGlm,
    MissingLinks,
}

impl Artifact {
    pub const ALL: [Artifact; 7] = [
        Artifact::SummaryLog,
        Artifact::VoltagesDss,
        Artifact::VoltagesGlm,
        Artifact::MissingNodes,
        Artifact::CurrentsDss,
        Artifact::CurrentsGlm,
        Artifact::MissingLinks,
    ];

    fn suffix(self) -> &'static str {
        match self {
            Artifact::SummaryLog => "_Summary.log",
            Artifact::VoltagesDss => "_Compare_Voltages_DSS.csv",
            Artifact::VoltagesGlm => "_Compare_Voltages_GLM.csv",
            Artifact::MissingNodes => "_Missing_Nodes_DSS.txt",
            Artifact::CurrentsDss => "_Compare_Currents_DSS.csv",
            Artifact::CurrentsGlm => "_Compare_Currents_GLM.csv",
            Artifact::MissingLinks => "_Missing_Links_DSS.txt",
        }
    }
}

/// Immutable per-run view of a case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseDescriptor {
    root: String,
    bases_ln: Vec<Volts>,
}

impl CaseDescriptor {
    /// Derive the run descriptor; the catalog entry is left untouched.
    pub fn derive(spec: &CaseSpec) -> Self {
        Self {
            root: spec.root.clone(),
            bases_ln: spec
                .bases_ll
                .iter()
                .map(|v| Volts(*v).line_to_neutral())
                .collect(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Candidate bases, line-to-neutral volts, in catalog order.
    pub fn bases_ln(&self) -> &[Volts] {
        &self.bases_ln
    }

    /// Solver-A style input: `<root-lowercase><suffix>` inside `dir`.
    pub fn dss_input(&self, dir: &Path, table: DssTable) -> PathBuf {
        dir.join(format!("{}{}", self.root.to_lowercase(), table.suffix()))
    }

    /// Solver-B voltage table, `<root>_volt.csv`.
    pub fn glm_voltages(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_volt.csv", self.root))
    }

    /// Solver-B current table, `<root>_curr.csv`.
    pub fn glm_currents(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_curr.csv", self.root))
    }

    pub fn artifact(&self, dir: &Path, artifact: Artifact) -> PathBuf {
        dir.join(format!("{}{}", self.root, artifact.suffix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_leaves_spec_untouched() {
        let spec = CaseSpec::new("IEEE13", &[480.0, 4160.0]);
        let first = CaseDescriptor::derive(&spec);
        let second = CaseDescriptor::derive(&spec);
        assert_eq!(spec.bases_ll, vec![480.0, 4160.0]);
        assert_eq!(first, second);
        assert!((first.bases_ln()[1].value() - 4160.0 / 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn file_names_follow_root_conventions() {
        let case = CaseDescriptor::derive(&CaseSpec::new("IEEE13_Assets", &[480.0]));
        let dir = Path::new("out");
        assert_eq!(
            case.dss_input(dir, DssTable::Voltages),
            dir.join("ieee13_assets_v.csv")
        );
        assert_eq!(case.glm_currents(dir), dir.join("IEEE13_Assets_curr.csv"));
        assert_eq!(
            case.artifact(dir, Artifact::MissingLinks),
            dir.join("IEEE13_Assets_Missing_Links_DSS.txt")
        );
    }

    #[test]
    fn spec_deserializes_bases_field() {
        let spec: CaseSpec =
            serde_json::from_str(r#"{"root":"IEEE37","bases":[480.0,4800.0]}"#).unwrap();
        assert_eq!(spec, CaseSpec::new("IEEE37", &[480.0, 4800.0]));
    }
}
