mod input;
mod logging;
mod model;
mod panels;
mod pipeline;
mod report;

use std::path::PathBuf;

use chrono::Datelike;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use crate::model::coverage::OverlapWeighting;
use crate::pipeline::{PipelineConfig, RunOutcome};

/// Exon, gene and panel coverage from a full-resolution coverage track.
#[derive(Debug, Clone, Parser)]
#[command(name = "kira-panelcov", version)]
struct Cli {
    /// Full-resolution coverage BED (`chrom start end depth`), optionally gzipped.
    #[arg(short = 'f', long = "full-res")]
    full_res: PathBuf,
    /// Illumina V2 sample sheet with panels in the [Cloud_Data] Description column.
    #[arg(short = 's', long = "sample-sheet")]
    sample_sheet: PathBuf,
    /// Sample or combined run name, as listed in the sample sheet.
    #[arg(short = 'n', long = "sample-name")]
    sample_name: String,
    /// Folder holding one `<panel>.bed` per panel.
    #[arg(short = 'b', long = "panel-bed-folder")]
    panel_bed_folder: PathBuf,
    /// JSON panel registry; derived from the bed folder when omitted.
    #[arg(long = "registry")]
    registry: Option<PathBuf>,
    /// Output root; reports go to `<out>/<sample-name>/`.
    #[arg(short = 'o', long = "out", default_value = ".")]
    out: PathBuf,
    /// Year used to rebuild `NGS<yy>-` sample names (default: current year).
    #[arg(long = "run-year")]
    run_year: Option<u16>,
    #[arg(long = "overlap-weighting", value_enum, default_value_t = WeightingArg::Unclipped)]
    overlap_weighting: WeightingArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WeightingArg {
    Unclipped,
    Clipped,
}

impl From<WeightingArg> for OverlapWeighting {
    fn from(value: WeightingArg) -> Self {
        match value {
            WeightingArg::Unclipped => OverlapWeighting::Unclipped,
            WeightingArg::Clipped => OverlapWeighting::Clipped,
        }
    }
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();
    let config = build_config(cli, current_year());
    match pipeline::run(&config) {
        Ok(RunOutcome::Skipped) => {}
        Ok(RunOutcome::Completed(paths)) => {
            info!("finished {}: {} panel report(s)", config.sample_name, paths.len());
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn build_config(cli: Cli, default_year: i32) -> PipelineConfig {
    let year = cli.run_year.map(i32::from).unwrap_or(default_year);
    PipelineConfig {
        full_res: cli.full_res,
        sample_sheet: cli.sample_sheet,
        sample_name: cli.sample_name,
        panel_bed_folder: cli.panel_bed_folder,
        registry: cli.registry,
        out_dir: cli.out,
        year_prefix: year_prefix(year),
        weighting: cli.overlap_weighting.into(),
    }
}

fn year_prefix(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
