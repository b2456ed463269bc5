//! Sorted difference tables (`_Compare_*.csv`).

use std::path::Path;

use csv::{Terminator, WriterBuilder};
use pfc_core::{DiffRecord, PfcResult};

/// Voltage rows at or above this difference are left out of the table.
pub const VOLTAGE_REPORT_LIMIT: f64 = 0.8;

/// Column layout and filtering of one comparison table.
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    pub header: [&'static str; 4],
    /// Decimal places for the three value columns.
    pub precision: usize,
    /// Rows are written only when `diff < limit`.
    pub limit: Option<f64>,
}

pub const VOLTAGES_DSS: TableLayout = TableLayout {
    header: ["bus_phs", "vbase", "vdss", "vdiff"],
    precision: 5,
    limit: Some(VOLTAGE_REPORT_LIMIT),
};

pub const VOLTAGES_GLM: TableLayout = TableLayout {
    header: ["bus_phs", "vbase", "vglm", "vdiff"],
    precision: 5,
    limit: Some(VOLTAGE_REPORT_LIMIT),
};

pub const CURRENTS_DSS: TableLayout = TableLayout {
    header: ["class.name.phs", "ibase", "idss", "idiff"],
    precision: 3,
    limit: None,
};

pub const CURRENTS_GLM: TableLayout = TableLayout {
    header: ["class_name_phs", "ibase", "iglm", "idiff"],
    precision: 3,
    limit: None,
};

/// Write `records` in the order given, which is expected to be the ranked
/// order. Returns the number of data rows written.
pub fn write_diff_table(path: &Path, layout: &TableLayout, records: &[DiffRecord]) -> PfcResult<usize> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;
    writer.write_record(layout.header)?;

    let p = layout.precision;
    let mut rows = 0;
    for rec in records {
        if layout.limit.is_some_and(|limit| rec.diff >= limit) {
            continue;
        }
        writer.write_record([
            rec.key.to_string(),
            format!("{:.p$}", rec.baseline),
            format!("{:.p$}", rec.candidate),
            format!("{:.p$}", rec.diff),
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
