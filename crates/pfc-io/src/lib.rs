//! # pfc-io: Result-file I/O
//!
//! Reads the tabular outputs of the baseline run and the two solvers, and
//! writes the per-case comparison artifacts.
//!
//! ## Design Philosophy
//!
//! **Declared shapes**: each file format is a [`schema::RowSchema`] (header
//! rows, key column, named typed fields) consumed by one generic decoder, so a
//! column shift is a one-line change.
//!
//! **Absence is not failure**: loaders return [`Loaded`], which separates a
//! missing file from an empty one from a populated one. Only a malformed field
//! is an error, and it aborts the file with its path, line and field.
//!
//! ## Supported Files
//!
//! | source | files | module |
//! |--------|-------|--------|
//! | baseline, solver A | `<root>_v/_i/_t/_s.csv` | [`importers::opendss`] |
//! | solver B | `<Root>_volt.csv`, `<Root>_curr.csv` | [`importers::gridlabd`] |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pfc_io::importers::opendss;
//!
//! fn main() -> pfc_core::PfcResult<()> {
//!     let volts = opendss::load_voltages(Path::new("test/ieee13_v.csv"))?;
//!     println!("{} bus-phases ({})", volts.clone().into_inner().len(), volts.label());
//!     Ok(())
//! }
//! ```

pub mod exporters;
pub mod importers;
pub mod schema;

pub use schema::Loaded;
