//! Case catalog: which networks to compare and where their results live.
//!
//! The built-in catalog lists the standard feeder test cases. A TOML file can
//! replace the case list, the directories, or both:
//!
//! ```toml
//! [paths]
//! baseline = "./test/"
//! solver_a = "./test/dss/"
//! solver_b = "./test/glm/"
//!
//! [[case]]
//! root = "IEEE13"
//! bases = [480.0, 4160.0, 13200.0, 115000.0]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pfc_core::{CaseSpec, ComparisonDirs, PfcError};
use serde::{Deserialize, Serialize};

/// Standard test cases with their line-to-line base voltages.
pub fn builtin_cases() -> Vec<CaseSpec> {
    vec![
        CaseSpec::new("ACEP_PSIL", &[314.0, 480.0]),
        CaseSpec::new("EPRI_DPV_J1", &[416.0, 12470.0, 69000.0]),
        CaseSpec::new("IEEE123", &[480.0, 4160.0]),
        CaseSpec::new("IEEE123_PV", &[4160.0]),
        CaseSpec::new("Transactive", &[4160.0]),
        CaseSpec::new("IEEE13", &[480.0, 4160.0, 13200.0, 115000.0]),
        CaseSpec::new("IEEE13_Assets", &[480.0, 4160.0, 115000.0]),
        CaseSpec::new("IEEE37", &[480.0, 4800.0, 230000.0]),
        CaseSpec::new("IEEE8500", &[12470.0, 115000.0]),
        CaseSpec::new("IEEE8500_3subs", &[12480.0, 69000.0, 115000.0]),
        CaseSpec::new("R2_12_47_2", &[480.0, 12470.0, 100000.0]),
    ]
}

/// Directories plus the ordered case list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub paths: ComparisonDirs,
    /// Cases in processing order. Omitted in a file, the built-in list applies.
    #[serde(rename = "case", default = "builtin_cases")]
    pub cases: Vec<CaseSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            paths: ComparisonDirs::default(),
            cases: builtin_cases(),
        }
    }
}

impl CatalogConfig {
    /// Load a catalog from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading case catalog '{}'", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing case catalog '{}'", path.display()))?;
        for case in &config.cases {
            if case.root.trim().is_empty() {
                return Err(PfcError::Config(format!(
                    "case catalog '{}' has a case with an empty root",
                    path.display()
                ))
                .into());
            }
        }
        Ok(config)
    }

    /// Render the catalog in the same TOML shape [`CatalogConfig::load_from`] reads.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing case catalog to TOML")
    }

    /// Cases named in `roots` (case-insensitive), in catalog order. An empty
    /// filter selects every case; an unknown root is an error.
    pub fn select(&self, roots: &[String]) -> Result<Vec<CaseSpec>> {
        if roots.is_empty() {
            return Ok(self.cases.clone());
        }
        for root in roots {
            if !self.cases.iter().any(|c| c.root.eq_ignore_ascii_case(root)) {
                bail!("case '{}' is not in the catalog", root);
            }
        }
        Ok(self
            .cases
            .iter()
            .filter(|c| roots.iter().any(|r| c.root.eq_ignore_ascii_case(r)))
            .cloned()
            .collect())
    }
}
