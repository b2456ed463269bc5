use crate::manifest::{write_batch_manifest, BatchManifest};
use crate::summary::{CaseSummary, ErrorNorms, SourceCounts};
use anyhow::{Context, Result};
use pfc_algo::{
    missing_entities, rank, ranked_diff, reconcile_currents, record_norm, PositionalOrdinalMatcher,
    CURRENT_NORM_LIMIT, VOLTAGE_NORM_LIMIT,
};
use pfc_core::{
    Artifact, CaseDescriptor, CaseSpec, Category, ComparisonDirs, CurrentMap, Diagnostics,
    DssTable, PfcResult, RunSummary, TapMap, VoltageMap,
};
use pfc_io::exporters::{
    write_diff_table, write_missing_report, write_summary_log, CURRENTS_DSS, CURRENTS_GLM,
    VOLTAGES_DSS, VOLTAGES_GLM,
};
use pfc_io::importers::{gridlabd, opendss};
use pfc_io::Loaded;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything one case comparison produced besides the files themselves.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub summary: CaseSummary,
    /// Artifact paths in the order they were written.
    pub artifacts: Vec<PathBuf>,
    pub diagnostics: Diagnostics,
}

/// The four solver-A style tables of one result directory.
struct DssResults {
    voltages: VoltageMap,
    currents: CurrentMap,
    taps: TapMap,
    summary: RunSummary,
}

impl DssResults {
    fn load(case: &CaseDescriptor, dir: &Path, diagnostics: &mut Diagnostics) -> Result<Self> {
        Ok(Self {
            voltages: load_table(case, dir, DssTable::Voltages, opendss::load_voltages, diagnostics)?,
            currents: load_table(case, dir, DssTable::Currents, opendss::load_currents, diagnostics)?,
            taps: load_table(case, dir, DssTable::Taps, opendss::load_taps, diagnostics)?,
            summary: load_table(case, dir, DssTable::Summary, opendss::load_summary, diagnostics)?,
        })
    }
}

fn load_table<T: Default>(
    case: &CaseDescriptor,
    dir: &Path,
    table: DssTable,
    loader: fn(&Path) -> PfcResult<Loaded<T>>,
    diagnostics: &mut Diagnostics,
) -> Result<T> {
    let path = case.dss_input(dir, table);
    let loaded = loader(&path)
        .with_context(|| format!("case {}: loading '{}'", case.root(), path.display()))?;
    Ok(settle(loaded, &path, diagnostics))
}

/// Unwrap a load outcome, noting a missing file.
fn settle<T: Default>(loaded: Loaded<T>, path: &Path, diagnostics: &mut Diagnostics) -> T {
    if loaded.is_missing() {
        debug!(path = %path.display(), "input file not found, using empty table");
        diagnostics.note(
            Category::Input,
            format!("input file '{}' not found", path.display()),
        );
    }
    loaded.into_inner()
}

/// Compare one case and write its seven artifacts under `dirs.solver_a`.
///
/// Missing input files compare as empty tables. A malformed input file or a
/// failed write aborts the case with the offending path in the error chain.
pub fn compare_case(spec: &CaseSpec, dirs: &ComparisonDirs) -> Result<CaseReport> {
    let case = CaseDescriptor::derive(spec);
    let root = case.root();
    info!(case = root, "comparing case");
    let mut diagnostics = Diagnostics::new();

    let base = DssResults::load(&case, &dirs.baseline, &mut diagnostics)?;
    let test = DssResults::load(&case, &dirs.solver_a, &mut diagnostics)?;

    let glm_volt_path = case.glm_voltages(&dirs.solver_b);
    let glm_volts = gridlabd::load_voltages(&glm_volt_path, case.bases_ln())
        .with_context(|| format!("case {}: loading '{}'", root, glm_volt_path.display()))?;
    let glm_volts = settle(glm_volts, &glm_volt_path, &mut diagnostics);
    for key in &glm_volts.unresolved {
        warn!(case = root, bus = %key, "no candidate base normalizes voltage");
        diagnostics.warn(
            Category::Normalize,
            "no candidate base normalizes voltage",
            key.to_string(),
        );
    }

    let glm_curr_path = case.glm_currents(&dirs.solver_b);
    let glm_currs = gridlabd::load_currents(&glm_curr_path)
        .with_context(|| format!("case {}: loading '{}'", root, glm_curr_path.display()))?;
    let glm_currs = settle(glm_currs, &glm_curr_path, &mut diagnostics);

    fs::create_dir_all(&dirs.solver_a)
        .with_context(|| format!("creating report directory '{}'", dirs.solver_a.display()))?;
    let out = |artifact: Artifact| case.artifact(&dirs.solver_a, artifact);
    let written = |path: &Path| format!("case {}: writing '{}'", root, path.display());

    let path = out(Artifact::SummaryLog);
    write_summary_log(&path, &base.summary, &test.summary, &base.taps, &test.taps)
        .with_context(|| written(&path))?;

    let v_dss = ranked_diff(&base.voltages, &test.voltages);
    let path = out(Artifact::VoltagesDss);
    write_diff_table(&path, &VOLTAGES_DSS, &v_dss).with_context(|| written(&path))?;

    let v_glm = ranked_diff(&base.voltages, &glm_volts.voltages);
    let path = out(Artifact::VoltagesGlm);
    write_diff_table(&path, &VOLTAGES_GLM, &v_glm).with_context(|| written(&path))?;

    let path = out(Artifact::MissingNodes);
    write_missing_report(&path, &missing_entities(&base.voltages, &test.voltages), "nodes")
        .with_context(|| written(&path))?;

    let i_dss = ranked_diff(&base.currents, &test.currents);
    let path = out(Artifact::CurrentsDss);
    write_diff_table(&path, &CURRENTS_DSS, &i_dss).with_context(|| written(&path))?;

    let reconciled = reconcile_currents(
        &glm_currs.links,
        &glm_currs.currents,
        &base.currents,
        &PositionalOrdinalMatcher,
    );
    for key in &reconciled.unmatched {
        warn!(case = root, link = %key, "link phase has no baseline conductor, not compared");
        diagnostics.warn(
            Category::Reconcile,
            "link phase has no baseline conductor, not compared",
            key.to_string(),
        );
    }
    let i_glm = rank(reconciled.records);
    let path = out(Artifact::CurrentsGlm);
    write_diff_table(&path, &CURRENTS_GLM, &i_glm).with_context(|| written(&path))?;

    let path = out(Artifact::MissingLinks);
    write_missing_report(&path, &missing_entities(&base.currents, &test.currents), "links")
        .with_context(|| written(&path))?;

    let summary = CaseSummary {
        root: root.to_string(),
        buses: SourceCounts {
            baseline: base.voltages.len(),
            solver_a: test.voltages.len(),
            solver_b: glm_volts.voltages.len(),
        },
        links: SourceCounts {
            baseline: base.currents.len(),
            solver_a: test.currents.len(),
            solver_b: glm_currs.currents.len(),
        },
        norms: ErrorNorms {
            voltage_solver_a: record_norm(&v_dss, VOLTAGE_NORM_LIMIT),
            voltage_solver_b: record_norm(&v_glm, VOLTAGE_NORM_LIMIT),
            current_solver_a: record_norm(&i_dss, CURRENT_NORM_LIMIT),
            current_solver_b: record_norm(&i_glm, CURRENT_NORM_LIMIT),
        },
    };
    info!(case = root, diagnostics = %diagnostics.summary(), "case compared");

    Ok(CaseReport {
        summary,
        artifacts: Artifact::ALL.into_iter().map(out).collect(),
        diagnostics,
    })
}

/// Compare `cases` in order, printing one summary line per case to stdout.
/// Stops at the first case that fails.
pub fn run_batch(
    cases: &[CaseSpec],
    dirs: &ComparisonDirs,
    manifest: Option<&Path>,
) -> Result<Vec<CaseReport>> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_batch_to(cases, dirs, manifest, &mut handle)
}

/// [`run_batch`] with the summary lines sent to `out`.
pub fn run_batch_to<W: Write>(
    cases: &[CaseSpec],
    dirs: &ComparisonDirs,
    manifest: Option<&Path>,
    out: &mut W,
) -> Result<Vec<CaseReport>> {
    let mut reports = Vec::with_capacity(cases.len());
    for spec in cases {
        let report = compare_case(spec, dirs)
            .with_context(|| format!("comparing case '{}'", spec.root))?;
        writeln!(out, "{}", report.summary).context("writing case summary line")?;
        reports.push(report);
    }
    if let Some(path) = manifest {
        write_batch_manifest(path, &BatchManifest::new(dirs, &reports))?;
        info!(path = %path.display(), cases = reports.len(), "wrote batch manifest");
    }
    Ok(reports)
}
