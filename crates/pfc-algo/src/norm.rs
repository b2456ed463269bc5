//! Scalar fit metrics over difference records.

use pfc_core::DiffRecord;

/// Voltage differences above this many per-unit are excluded from the norm.
pub const VOLTAGE_NORM_LIMIT: Option<f64> = Some(0.8);

/// Current differences are averaged without a cutoff.
pub const CURRENT_NORM_LIMIT: Option<f64> = None;

/// Mean of the differences at or below `limit` (all of them when `limit` is
/// `None`). Returns 0.0 when nothing qualifies.
pub fn error_norm<I>(diffs: I, limit: Option<f64>) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = diffs
        .into_iter()
        .filter(|d| limit.map_or(true, |limit| *d <= limit))
        .fold((0.0, 0usize), |(sum, count), d| (sum + d, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Norm over keyed records. Cross-solver records carrying a reference
/// identifier are scored the same way; the reference does not take part.
pub fn record_norm(records: &[DiffRecord], limit: Option<f64>) -> f64 {
    error_norm(records.iter().map(|r| r.diff), limit)
}
