//! Comparison algorithms for power-flow results.
//!
//! Everything here is pure: tables in, records and metrics out. File access
//! lives in `pfc-io`, orchestration in `pfc-batch`.
//!
//! - [`diff`]: per-entity absolute differences and ranking
//! - [`norm`]: mean absolute error with an optional outlier cutoff
//! - [`missing`]: entities present on one side only
//! - [`reconcile`]: cross-solver branch name and phase alignment

pub mod diff;
pub mod missing;
pub mod norm;
pub mod reconcile;

pub use diff::{abs_diff, rank, ranked_diff};
pub use missing::missing_entities;
pub use norm::{error_norm, record_norm, CURRENT_NORM_LIMIT, VOLTAGE_NORM_LIMIT};
pub use reconcile::{
    reconcile_currents, BranchMatcher, LinkMatch, PositionalOrdinalMatcher, Reconciliation,
};
