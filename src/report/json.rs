use serde::Serialize;

use crate::model::coverage::CoverageStat;

#[derive(Debug, Clone, Serialize)]
pub struct GeneFlag {
    pub gene: String,
    pub pct_bases_ge_20x: f64,
}

/// Per-panel summary written next to the coverage tables.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub run_name: String,
    pub sample: String,
    pub ordinal: usize,
    pub panel_id: String,
    pub overlap_weighting: String,
    pub inputs: SummaryInputs,
    pub n_exons: usize,
    pub n_genes_reported: usize,
    pub genes_without_coverage: Vec<String>,
    pub panel: CoverageStat,
    /// Genes with fewer than 95% of bases at >= 20x, sorted case-insensitively.
    pub low_coverage_genes: Vec<GeneFlag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryInputs {
    pub full_res: String,
    pub sample_sheet: String,
    pub panel_bed: String,
    pub track_records_read: usize,
    pub track_records_kept: usize,
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}
