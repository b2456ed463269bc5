//! Result-file loaders, one module per producing tool.
//!
//! Every loader takes a path and returns `PfcResult<Loaded<_>>`: a missing
//! file is `Loaded::Missing`, not an error, while a malformed numeric field
//! aborts the load.

pub mod gridlabd;
pub mod opendss;

pub use gridlabd::{GlmCurrents, GlmVoltages, GLM_CURRENT_TOLERANCE};
pub use opendss::DSS_CURRENT_TOLERANCE;
