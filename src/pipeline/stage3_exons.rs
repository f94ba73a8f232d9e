use std::collections::HashMap;

use tracing::info;

use crate::model::coverage::{CoverageStat, CoverageSums, Fragment, OverlapWeighting};
use crate::model::records::ExonRecord;
use crate::model::track::CoverageTrack;
use crate::panels::PanelTarget;

/// Overlap fragments collected per gene across all of its exons, genes kept in
/// order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct GeneAccumulators {
    order: Vec<String>,
    fragments: HashMap<String, Vec<Fragment>>,
}

impl GeneAccumulators {
    pub fn register(&mut self, gene: &str) -> &mut Vec<Fragment> {
        if !self.fragments.contains_key(gene) {
            self.order.push(gene.to_string());
        }
        self.fragments.entry(gene.to_string()).or_default()
    }

    pub fn extend(&mut self, gene: &str, fragments: &[Fragment]) {
        self.register(gene).extend_from_slice(fragments);
    }

    pub fn fragments(&self, gene: &str) -> &[Fragment] {
        self.fragments.get(gene).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn genes(&self) -> impl Iterator<Item = (&str, &[Fragment])> {
        self.order
            .iter()
            .map(|gene| (gene.as_str(), self.fragments(gene)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ExonCoverage {
    pub exon: ExonRecord,
    pub stat: CoverageStat,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub exons: Vec<ExonCoverage>,
    pub genes: GeneAccumulators,
}

/// Overlap fragments of one exon, in track order.
pub fn exon_fragments(
    exon: &ExonRecord,
    track: &CoverageTrack,
    weighting: OverlapWeighting,
) -> Vec<Fragment> {
    track
        .overlapping(&exon.chrom, exon.start, exon.end)
        .map(|iv| {
            let length = match weighting {
                OverlapWeighting::Unclipped => iv.len(),
                OverlapWeighting::Clipped => iv
                    .end
                    .min(exon.end)
                    .saturating_sub(iv.start.max(exon.start)),
            };
            Fragment {
                length,
                depth: iv.depth,
            }
        })
        .collect()
}

/// Coverage of one exon; its fragments are also handed to the exon's gene,
/// including when they carry no weight.
pub fn compute_exon(
    exon: &ExonRecord,
    track: &CoverageTrack,
    weighting: OverlapWeighting,
    genes: &mut GeneAccumulators,
) -> CoverageStat {
    let fragments = exon_fragments(exon, track, weighting);
    genes.extend(&exon.gene, &fragments);
    CoverageSums::from_fragments(&fragments).stat()
}

pub fn run_stage3(
    target: &PanelTarget,
    track: &CoverageTrack,
    weighting: OverlapWeighting,
) -> Stage3Output {
    info!(
        "calculating exon coverage for {} exons ({} genes) of panel {}",
        target.exons.len(),
        target.genes().len(),
        target.panel_id
    );
    let mut genes = GeneAccumulators::default();
    let mut exons = Vec::with_capacity(target.exons.len());
    for exon in &target.exons {
        let stat = compute_exon(exon, track, weighting, &mut genes);
        exons.push(ExonCoverage {
            exon: exon.clone(),
            stat,
        });
    }
    Stage3Output { exons, genes }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_exons.rs"]
mod tests;
