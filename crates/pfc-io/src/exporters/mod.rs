//! Report artifacts written for each compared case.
//!
//! Emission order always comes from the slices handed in (ranked difference
//! records, file-ordered key lists), never from hash iteration.

pub mod missing;
pub mod summary_log;
pub mod tables;

pub use missing::write_missing_report;
pub use summary_log::{write_summary_log, ABSENT_MARKER};
pub use tables::{
    write_diff_table, TableLayout, CURRENTS_DSS, CURRENTS_GLM, VOLTAGES_DSS, VOLTAGES_GLM,
    VOLTAGE_REPORT_LIMIT,
};
