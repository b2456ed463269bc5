//! Side-by-side run diagnostics and regulator taps (`_Summary.log`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pfc_core::{PfcResult, RunSummary, TapMap, SUMMARY_KEYS};

/// Printed in place of a value one side does not have.
pub const ABSENT_MARKER: &str = "**ABSENT**";

/// Write the summary log for one case. Case 1 is the baseline, Case 2 is
/// solver A. Regulators are listed in baseline file order, followed by those
/// only solver A reports.
pub fn write_summary_log(
    path: &Path,
    base_summary: &RunSummary,
    test_summary: &RunSummary,
    base_taps: &TapMap,
    test_taps: &TapMap,
) -> PfcResult<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "Quantity  Case1   Case2")?;
    for key in SUMMARY_KEYS {
        writeln!(
            out,
            "{} {} {}",
            key,
            base_summary.get(key).unwrap_or(ABSENT_MARKER),
            test_summary.get(key).unwrap_or(ABSENT_MARKER)
        )?;
    }

    writeln!(out, "\nRegulator, Case 1 Tap, Case 2 Tap")?;
    for (name, tap) in base_taps.iter() {
        match test_taps.get(name) {
            Some(other) => writeln!(out, "{} {} {}", name, tap, other)?,
            None => writeln!(out, "{} {} {}", name, tap, ABSENT_MARKER)?,
        }
    }
    for (name, tap) in test_taps.iter() {
        if !base_taps.contains_key(name) {
            writeln!(out, "{} {} {}", name, ABSENT_MARKER, tap)?;
        }
    }
    out.flush()?;
    Ok(())
}
