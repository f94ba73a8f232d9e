use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::model::records::ExonRecord;

pub mod registry;
pub mod resolver;

/// Exon targets of one panel, in definition order.
#[derive(Debug, Clone)]
pub struct PanelTarget {
    pub panel_id: String,
    pub exons: Vec<ExonRecord>,
}

impl PanelTarget {
    pub fn chromosomes(&self) -> BTreeSet<String> {
        self.exons.iter().map(|e| e.chrom.clone()).collect()
    }

    /// Gene names in order of first appearance.
    pub fn genes(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for exon in &self.exons {
            if seen.insert(exon.gene.as_str()) {
                out.push(exon.gene.as_str());
            }
        }
        out
    }
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("sample {0} is not listed in the sample sheet")]
    UnknownSample(String),
    #[error("sample {fragment} does not occur in run {run_name}")]
    SampleNotInRun { fragment: String, run_name: String },
    #[error("run {run_name}: ordinal {ordinal} exceeds panel list {panel_spec:?}")]
    OrdinalOutOfRange {
        run_name: String,
        ordinal: usize,
        panel_spec: String,
    },
    #[error("unknown panel {panel_id}: missing from the {registry} registry")]
    UnknownPanel {
        panel_id: String,
        registry: &'static str,
    },
    #[error("invalid panel registry {}: {source}", .path.display())]
    Registry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Input(#[from] InputError),
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/tests.rs"]
mod tests;
