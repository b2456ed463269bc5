use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pfc_core::ComparisonDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::runner::CaseReport;
use crate::summary::CaseSummary;

/// Per-case entry of the batch manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub summary: CaseSummary,
    pub artifacts: Vec<String>,
    /// Rendered diagnostic issues, one per entry.
    pub diagnostics: Vec<String>,
}

impl From<&CaseReport> for CaseRecord {
    fn from(report: &CaseReport) -> Self {
        Self {
            summary: report.summary.clone(),
            artifacts: report
                .artifacts
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            diagnostics: report
                .diagnostics
                .issues
                .iter()
                .map(|issue| issue.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    pub created_at: DateTime<Utc>,
    pub dirs: ComparisonDirs,
    pub num_cases: usize,
    pub cases: Vec<CaseRecord>,
}

impl BatchManifest {
    pub fn new(dirs: &ComparisonDirs, reports: &[CaseReport]) -> Self {
        Self {
            created_at: Utc::now(),
            dirs: dirs.clone(),
            num_cases: reports.len(),
            cases: reports.iter().map(CaseRecord::from).collect(),
        }
    }
}

pub fn write_batch_manifest(path: &Path, manifest: &BatchManifest) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating manifest directory '{}'", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(manifest).context("serializing batch manifest to JSON")?;
    fs::write(path, json)
        .with_context(|| format!("writing batch manifest '{}'", path.display()))?;
    Ok(())
}

pub fn load_batch_manifest(path: &Path) -> Result<BatchManifest> {
    let file = fs::File::open(path)
        .with_context(|| format!("opening batch manifest '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing batch manifest '{}'", path.display()))
}
