//! Bidirectional missing-entity reports (`_Missing_*_DSS.txt`).

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pfc_core::{MissingReport, PfcResult};

/// Write one line per key absent from the other side, then the two totals.
/// `noun` names the entities in the totals (`nodes`, `links`).
pub fn write_missing_report<K: Display>(
    path: &Path,
    report: &MissingReport<K>,
    noun: &str,
) -> PfcResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for key in &report.not_in_second {
        writeln!(out, "{} not in Case 2", key)?;
    }
    for key in &report.not_in_first {
        writeln!(out, "{} not in Case 1", key)?;
    }
    writeln!(
        out,
        "{} Case 1 {}, {} not in Case 2",
        report.first_total,
        noun,
        report.not_in_second.len()
    )?;
    writeln!(
        out,
        "{} Case 2 {}, {} not in Case 1",
        report.second_total,
        noun,
        report.not_in_first.len()
    )?;
    out.flush()?;
    Ok(())
}
