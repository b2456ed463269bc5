use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pfc", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare baseline, solver-A and solver-B results for each catalog case
    Compare {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Only compare this case (repeatable, catalog order is kept)
        #[arg(long = "case", value_name = "ROOT")]
        cases: Vec<String>,
        /// Also write a JSON manifest of the batch to this path
        #[arg(long, value_hint = ValueHint::FilePath)]
        manifest: Option<PathBuf>,
    },
    /// Print the effective case catalog as TOML
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

/// Catalog source and directory overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// TOML case catalog (defaults to the built-in cases)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,
    /// Baseline result directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub baseline: Option<PathBuf>,
    /// Solver-A result directory; reports are written here
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub solver_a: Option<PathBuf>,
    /// Solver-B result directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub solver_b: Option<PathBuf>,
}
