use anyhow::Result;
use pfc_batch::{run_batch, CatalogConfig};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use crate::cli::CatalogArgs;

impl CatalogArgs {
    /// Catalog file (or the built-in one) with the directory flags applied.
    pub fn resolve(&self) -> Result<CatalogConfig> {
        let mut config = match &self.catalog {
            Some(path) => CatalogConfig::load_from(path)?,
            None => CatalogConfig::default(),
        };
        if let Some(dir) = &self.baseline {
            config.paths.baseline = dir.clone();
        }
        if let Some(dir) = &self.solver_a {
            config.paths.solver_a = dir.clone();
        }
        if let Some(dir) = &self.solver_b {
            config.paths.solver_b = dir.clone();
        }
        Ok(config)
    }
}

pub fn compare(args: &CatalogArgs, cases: &[String], manifest: Option<&Path>) -> Result<()> {
    let config = args.resolve()?;
    let selected = config.select(cases)?;
    info!(
        cases = selected.len(),
        baseline = %config.paths.baseline.display(),
        solver_a = %config.paths.solver_a.display(),
        solver_b = %config.paths.solver_b.display(),
        "starting comparison batch"
    );
    let reports = run_batch(&selected, &config.paths, manifest)?;
    let warnings: usize = reports.iter().map(|r| r.diagnostics.warning_count()).sum();
    info!(cases = reports.len(), warnings, "comparison batch finished");
    Ok(())
}

pub fn catalog(args: &CatalogArgs) -> Result<()> {
    let config = args.resolve()?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", config.to_toml()?)?;
    Ok(())
}
