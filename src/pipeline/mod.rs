pub mod stage1_resolve;
pub mod stage2_track;
pub mod stage3_exons;
pub mod stage4_aggregate;
pub mod stage5_report;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::input::sample_sheet::{CONTROL_PREFIX, parse_sample_sheet};
use crate::input::{InputError, require_file};
use crate::model::coverage::OverlapWeighting;
use crate::panels::PanelError;
use crate::panels::registry::PanelRegistry;
use crate::panels::resolver::{PanelResolver, ResolvedPanel};
use stage1_resolve::run_stage1;
use stage2_track::{Stage2Output, run_stage2};
use stage3_exons::{Stage3Output, run_stage3};
use stage4_aggregate::{Stage4Output, run_stage4};
use stage5_report::{ReportPaths, Stage5Input, check_reports, write_reports};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error("failed to write coverage report: {0}")]
    Report(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub full_res: PathBuf,
    pub sample_sheet: PathBuf,
    pub sample_name: String,
    pub panel_bed_folder: PathBuf,
    pub registry: Option<PathBuf>,
    pub out_dir: PathBuf,
    /// Two-digit year used to rebuild `NGS<yy>-` sample names.
    pub year_prefix: String,
    pub weighting: OverlapWeighting,
}

#[derive(Debug)]
pub enum RunOutcome {
    Skipped,
    Completed(Vec<ReportPaths>),
}

#[derive(Debug)]
pub struct PanelRun {
    pub resolved: ResolvedPanel,
    pub stage2: Stage2Output,
    pub stage3: Stage3Output,
    pub stage4: Stage4Output,
}

/// Process-control and fill samples get no report.
pub fn is_skipped_sample(sample_name: &str) -> bool {
    sample_name.starts_with(CONTROL_PREFIX) || sample_name.to_ascii_lowercase().contains("fill")
}

pub fn load_registry(config: &PipelineConfig) -> Result<PanelRegistry, PanelError> {
    match &config.registry {
        Some(path) => PanelRegistry::load_json(path),
        None => PanelRegistry::from_bed_folder(&config.panel_bed_folder),
    }
}

/// Computes coverage for every panel of the run. Nothing is written unless all
/// panels resolve and compute.
pub fn compute(config: &PipelineConfig) -> Result<Vec<PanelRun>, PipelineError> {
    require_file(&config.sample_sheet)?;
    require_file(&config.full_res)?;

    let sheet = parse_sample_sheet(&config.sample_sheet)?;
    info!(
        "sample sheet {}: {} samples",
        config.sample_sheet.display(),
        sheet.len()
    );
    if sheet.is_empty() {
        warn!("sample sheet lists no samples in its [Cloud_Data] section");
    }
    let registry = load_registry(config)?;
    let resolver = PanelResolver::new(&sheet, &registry, &config.panel_bed_folder);
    let stage1 = run_stage1(&resolver, &config.sample_name, &config.year_prefix)?;

    let mut runs = Vec::with_capacity(stage1.panels.len());
    for resolved in stage1.panels {
        let stage2 = run_stage2(&config.full_res, &resolved.target)?;
        let stage3 = run_stage3(&resolved.target, &stage2.track, config.weighting);
        let stage4 = run_stage4(&resolved.panel_id, &stage3.genes);
        runs.push(PanelRun {
            resolved,
            stage2,
            stage3,
            stage4,
        });
    }
    Ok(runs)
}

pub fn run(config: &PipelineConfig) -> Result<RunOutcome, PipelineError> {
    if is_skipped_sample(&config.sample_name) {
        info!(
            "{} is a process-control or fill sample; no report generated",
            config.sample_name
        );
        return Ok(RunOutcome::Skipped);
    }

    let runs = compute(config)?;
    let inputs: Vec<Stage5Input<'_>> = runs.iter().map(|run| report_input(run, config)).collect();

    // every table of every panel is checked before the first row is appended
    for input in &inputs {
        check_reports(input, &config.out_dir).map_err(PipelineError::Report)?;
    }

    let mut written = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let paths = write_reports(input, &config.out_dir).map_err(PipelineError::Report)?;
        written.push(paths);
    }
    Ok(RunOutcome::Completed(written))
}

fn report_input<'a>(run: &'a PanelRun, config: &'a PipelineConfig) -> Stage5Input<'a> {
    Stage5Input {
        resolved: &run.resolved,
        exons: &run.stage3.exons,
        aggregate: &run.stage4,
        track_stats: run.stage2.stats,
        weighting: config.weighting,
        full_res: &config.full_res,
        sample_sheet: &config.sample_sheet,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
