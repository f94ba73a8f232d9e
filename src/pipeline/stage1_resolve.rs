use tracing::info;

use crate::panels::PanelError;
use crate::panels::resolver::{PanelResolver, ResolvedPanel};

pub const SAMPLE_PREFIX: &str = "NGS";

#[derive(Debug)]
pub struct Stage1Output {
    pub panels: Vec<ResolvedPanel>,
}

/// Splits a combined run name into its sample names. Samples after the first
/// carry only their number, so the `NGS<yy>-` prefix is put back.
pub fn expand_run_samples(run_name: &str, year_prefix: &str) -> Vec<String> {
    run_name
        .split('_')
        .map(|sample| {
            if sample.contains(SAMPLE_PREFIX) {
                sample.to_string()
            } else {
                format!("{SAMPLE_PREFIX}{year_prefix}-{sample}")
            }
        })
        .collect()
}

/// Resolves every sample of the run before any coverage is computed, so a bad
/// panel for one sample fails the whole run up front.
pub fn run_stage1(
    resolver: &PanelResolver<'_>,
    run_name: &str,
    year_prefix: &str,
) -> Result<Stage1Output, PanelError> {
    let samples = expand_run_samples(run_name, year_prefix);
    let mut panels = Vec::with_capacity(samples.len());
    for sample in &samples {
        info!("calculating coverage metrics for {sample}");
        panels.push(resolver.resolve(sample, run_name)?);
    }
    Ok(Stage1Output { panels })
}
