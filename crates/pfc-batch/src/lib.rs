//! Batch driver: compares every case of a catalog and writes its reports.
//!
//! Cases run one at a time in catalog order. Each case's line is printed to
//! stdout as soon as it finishes; the first failing case stops the batch.

pub mod catalog;
pub mod manifest;
pub mod runner;
pub mod summary;

pub use catalog::{builtin_cases, CatalogConfig};
pub use manifest::{load_batch_manifest, write_batch_manifest, BatchManifest, CaseRecord};
pub use runner::{compare_case, run_batch, run_batch_to, CaseReport};
pub use summary::{CaseSummary, ErrorNorms, SourceCounts};
