//! Result records produced by the comparison and consumed by the reports.

use serde::Serialize;

use crate::ids::EntityId;
use crate::measurement::MeasurementMap;

/// Absolute difference for one entity present on both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffRecord {
    /// Key reported in the first column of the comparison table.
    pub key: EntityId,
    /// Value from the reference side (always the baseline in reports).
    pub baseline: f64,
    /// Value from the side under test.
    pub candidate: f64,
    /// `|baseline - candidate|`, never negative.
    pub diff: f64,
    /// Solver-A identifier the key was matched to, for cross-solver rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<EntityId>,
}

impl DiffRecord {
    pub fn new(key: EntityId, baseline: f64, candidate: f64) -> Self {
        Self {
            key,
            baseline,
            candidate,
            diff: (baseline - candidate).abs(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: EntityId) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// Keys present on only one side of two tables over the same entity universe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReport<K = EntityId> {
    /// Number of entries in the first table ("Case 1").
    pub first_total: usize,
    /// Number of entries in the second table ("Case 2").
    pub second_total: usize,
    /// First-table keys absent from the second, in first-table order.
    pub not_in_second: Vec<K>,
    /// Second-table keys absent from the first, in second-table order.
    pub not_in_first: Vec<K>,
}

/// The solver diagnostics reported side by side in the summary log, in
/// report order.
pub const SUMMARY_KEYS: [&str; 18] = [
    "Status",
    "Mode",
    "Number",
    "LoadMult",
    "NumDevices",
    "NumBuses",
    "NumNodes",
    "Iterations",
    "ControlMode",
    "ControlIterations",
    "MaxPuVoltage",
    "MinPuVoltage",
    "TotalMW",
    "TotalMvar",
    "MWLosses",
    "pctLosses",
    "MvarLosses",
    "Frequency",
];

/// Pass-through run diagnostics of one solver run, kept as reported text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    fields: MeasurementMap<String, String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_string()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
