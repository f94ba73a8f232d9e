use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::input::depth_track::TrackLoadStats;
use crate::model::coverage::OverlapWeighting;
use crate::panels::resolver::ResolvedPanel;
use crate::pipeline::stage3_exons::ExonCoverage;
use crate::pipeline::stage4_aggregate::Stage4Output;
use crate::report::is_low_coverage;
use crate::report::json::{GeneFlag, SummaryData, SummaryInputs, render_summary_json};
use crate::report::tsv::{
    append_table, check_table_header, exon_header, exon_rows, gene_header, gene_rows,
    panel_header, panel_rows,
};

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub resolved: &'a ResolvedPanel,
    pub exons: &'a [ExonCoverage],
    pub aggregate: &'a Stage4Output,
    pub track_stats: TrackLoadStats,
    pub weighting: OverlapWeighting,
    pub full_res: &'a Path,
    pub sample_sheet: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub exon_table: PathBuf,
    pub gene_table: PathBuf,
    pub panel_table: PathBuf,
    pub summary: PathBuf,
}

impl ReportPaths {
    pub fn for_run(out_dir: &Path, run_name: &str, sample: &str, panel_id: &str) -> Self {
        let dir = out_dir.join(run_name);
        Self {
            exon_table: dir.join(format!("{run_name}.exon_coverage.tsv")),
            gene_table: dir.join(format!("{run_name}.gene_coverage.tsv")),
            panel_table: dir.join(format!("{run_name}.panel_coverage.tsv")),
            summary: dir.join(format!("{run_name}.{sample}.{panel_id}.summary.json")),
        }
    }
}

/// Verifies that any existing coverage tables of this panel's run carry the
/// expected headers. Touches nothing on disk.
pub fn check_reports(input: &Stage5Input<'_>, out_dir: &Path) -> io::Result<ReportPaths> {
    let resolved = input.resolved;
    let paths = ReportPaths::for_run(
        out_dir,
        &resolved.run_name,
        &resolved.sample,
        &resolved.panel_id,
    );
    check_table_header(&paths.exon_table, &exon_header())?;
    check_table_header(&paths.gene_table, &gene_header())?;
    check_table_header(&paths.panel_table, &panel_header())?;
    Ok(paths)
}

/// Appends this panel's rows to the run's three coverage tables and writes its
/// JSON summary. All three tables are checked before any of them is appended to.
pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> io::Result<ReportPaths> {
    let resolved = input.resolved;
    let sample = resolved.sample.as_str();
    let panel_id = resolved.panel_id.as_str();
    let paths = check_reports(input, out_dir)?;
    if let Some(dir) = paths.exon_table.parent() {
        fs::create_dir_all(dir)?;
    }

    append_table(
        &paths.exon_table,
        &exon_header(),
        &exon_rows(sample, input.exons),
    )?;
    append_table(
        &paths.gene_table,
        &gene_header(),
        &gene_rows(sample, panel_id, &input.aggregate.genes),
    )?;
    append_table(
        &paths.panel_table,
        &panel_header(),
        &panel_rows(sample, &input.aggregate.panel),
    )?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary).map_err(io::Error::other)?;
    fs::write(&paths.summary, json)?;

    info!(
        "wrote coverage for {sample}/{panel_id} to {}",
        paths.exon_table.parent().unwrap_or(out_dir).display()
    );
    Ok(paths)
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let resolved = input.resolved;
    let aggregate = input.aggregate;

    let mut low_coverage_genes: Vec<GeneFlag> = aggregate
        .genes
        .iter()
        .filter(|g| is_low_coverage(&g.stat))
        .map(|g| GeneFlag {
            gene: g.gene.clone(),
            pct_bases_ge_20x: g.stat.pct_ge_20x,
        })
        .collect();
    low_coverage_genes.sort_by(|a, b| {
        a.gene
            .to_lowercase()
            .cmp(&b.gene.to_lowercase())
            .then_with(|| a.gene.cmp(&b.gene))
    });

    SummaryData {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        run_name: resolved.run_name.clone(),
        sample: resolved.sample.clone(),
        ordinal: resolved.ordinal,
        panel_id: resolved.panel_id.clone(),
        overlap_weighting: input.weighting.as_str().to_string(),
        inputs: SummaryInputs {
            full_res: input.full_res.display().to_string(),
            sample_sheet: input.sample_sheet.display().to_string(),
            panel_bed: resolved.bed_path.display().to_string(),
            track_records_read: input.track_stats.records_read,
            track_records_kept: input.track_stats.records_kept,
        },
        n_exons: input.exons.len(),
        n_genes_reported: aggregate.genes.len(),
        genes_without_coverage: aggregate.uncovered_genes.clone(),
        panel: aggregate.panel.stat,
        low_coverage_genes,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
