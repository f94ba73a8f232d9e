use tracing::{debug, info, warn};

use crate::model::coverage::{CoverageStat, CoverageSums, Fragment};
use crate::pipeline::stage3_exons::GeneAccumulators;

#[derive(Debug, Clone)]
pub struct GeneCoverage {
    pub gene: String,
    pub stat: CoverageStat,
}

#[derive(Debug, Clone)]
pub struct PanelCoverage {
    pub panel_id: String,
    pub stat: CoverageStat,
    pub n_genes: usize,
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    /// Genes with at least one covered base, in panel order.
    pub genes: Vec<GeneCoverage>,
    /// Genes left out of the gene table and the panel roll-up.
    pub uncovered_genes: Vec<String>,
    pub panel: PanelCoverage,
}

pub fn aggregate_gene(fragments: &[Fragment]) -> CoverageStat {
    CoverageSums::from_fragments(fragments).stat()
}

/// Panel-level coverage over every gene's fragments. Genes without weight add
/// nothing to any sum, so leaving them in or out gives the same result.
pub fn aggregate_panel<'a, I>(genes: I) -> CoverageStat
where
    I: IntoIterator<Item = &'a [Fragment]>,
{
    let mut total = CoverageSums::default();
    for fragments in genes {
        let sums = CoverageSums::from_fragments(fragments);
        if sums.is_empty() {
            continue;
        }
        total.merge(&sums);
    }
    total.stat()
}

pub fn run_stage4(panel_id: &str, accumulators: &GeneAccumulators) -> Stage4Output {
    if accumulators.is_empty() {
        warn!("panel {panel_id} defines no genes");
    } else {
        info!(
            "calculating gene coverage for {} genes",
            accumulators.len()
        );
    }
    let mut genes = Vec::with_capacity(accumulators.len());
    let mut uncovered_genes = Vec::new();

    for (gene, fragments) in accumulators.genes() {
        if CoverageSums::from_fragments(fragments).is_empty() {
            debug!("gene {gene} has no covered bases; excluded from gene and panel tables");
            uncovered_genes.push(gene.to_string());
            continue;
        }
        genes.push(GeneCoverage {
            gene: gene.to_string(),
            stat: aggregate_gene(fragments),
        });
    }

    info!("calculating panel coverage for {panel_id}");
    let panel = PanelCoverage {
        panel_id: panel_id.to_string(),
        stat: aggregate_panel(accumulators.genes().map(|(_, fragments)| fragments)),
        n_genes: genes.len(),
    };

    Stage4Output {
        genes,
        uncovered_genes,
        panel,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_aggregate.rs"]
mod tests;
