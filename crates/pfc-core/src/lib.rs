//! # pfc-core: Shared types for power-flow result comparison
//!
//! The vocabulary every other crate speaks when reconciling the outputs of
//! two independent distribution power-flow solvers against a baseline.
//!
//! ## Core Data Structures
//!
//! - [`EntityId`] - bus-phase or branch-conductor key, with kind and terminal
//! - [`MeasurementMap`] - one quantity from one source, keyed by entity
//! - [`CaseSpec`] / [`CaseDescriptor`] - catalog entry and its per-run view
//! - [`units`] - `Volts`, `PerUnit` and the per-unit normalizer
//! - [`DiffRecord`] / [`MissingReport`] / [`RunSummary`] - comparison results
//! - [`Diagnostics`] - recoverable anomalies collected during a case
//! - [`PfcError`] - everything that aborts a case
//!
//! ## Quick Start
//!
//! ```rust
//! use pfc_core::*;
//!
//! let case = CaseDescriptor::derive(&CaseSpec::new("IEEE13", &[480.0, 4160.0]));
//!
//! let mut volts = VoltageMap::new();
//! let pu = units::normalize_voltage(units::Volts(2401.0), case.bases_ln());
//! volts.insert(EntityId::bus("671", Phase::A), pu.value());
//!
//! assert_eq!(volts.len(), 1);
//! ```

pub mod case;
pub mod diagnostics;
pub mod error;
pub mod ids;
pub mod measurement;
pub mod records;
pub mod units;

pub use case::{Artifact, CaseDescriptor, CaseSpec, ComparisonDirs, DssTable};
pub use diagnostics::{Category, DiagnosticIssue, Diagnostics, Severity};
pub use error::{PfcError, PfcResult};
pub use ids::{canonical_name, EntityId, EntityKind, LinkPrefix, Phase, Terminal};
pub use measurement::{CurrentMap, MeasurementMap, TapMap, VoltageMap};
pub use records::{DiffRecord, MissingReport, RunSummary, SUMMARY_KEYS};
