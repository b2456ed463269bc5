//! Unified error types for the comparison toolkit
//!
//! [`PfcError`] covers everything that can stop a case: file access, CSV
//! framing, malformed numeric fields, schema misuse and bad configuration.
//! Recoverable anomalies (missing files, unnormalizable voltages, dropped
//! links) are not errors; they are recorded in
//! [`Diagnostics`](crate::diagnostics::Diagnostics) instead.
//!
//! # Example
//!
//! ```ignore
//! use pfc_core::{PfcError, PfcResult};
//!
//! fn load_case(path: &Path) -> PfcResult<()> {
//!     let table = load_voltages(path)?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for all comparison operations.
#[derive(Error, Debug)]
pub enum PfcError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing errors (bad quoting, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field that could not be converted to its declared type.
    #[error("Parse error in '{}' line {line}, field '{field}': {reason} (value {value:?})", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        field: String,
        value: String,
        reason: String,
    },

    /// Misuse of a row schema (unknown field name, wrong type requested)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PfcError {
    /// Build a [`PfcError::Parse`] for one field of one record.
    pub fn parse(
        path: impl Into<PathBuf>,
        line: u64,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        PfcError::Parse {
            path: path.into(),
            line,
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results using PfcError.
pub type PfcResult<T> = Result<T, PfcError>;
