pub mod json;
pub mod tsv;

use crate::model::coverage::CoverageStat;

pub const STAT_COLUMNS: [&str; 6] = [
    "avg_coverage",
    "pct_bases_gt_0x",
    "pct_bases_ge_10x",
    "pct_bases_ge_20x",
    "pct_bases_ge_50x",
    "pct_bases_ge_100x",
];

/// Genes below this fraction of bases at >= 20x are listed as suboptimal.
pub const LOW_COVERAGE_PCT_20X: f64 = 0.95;

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn stat_fields(stat: &CoverageStat) -> [String; 6] {
    let breadth = stat.breadth();
    [
        format_f64_6(stat.avg_depth),
        format_f64_6(breadth[0]),
        format_f64_6(breadth[1]),
        format_f64_6(breadth[2]),
        format_f64_6(breadth[3]),
        format_f64_6(breadth[4]),
    ]
}

pub fn is_low_coverage(stat: &CoverageStat) -> bool {
    stat.pct_ge_20x < LOW_COVERAGE_PCT_20X
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
