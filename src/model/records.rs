/// One row of the `[Cloud_Data]` section of a sample sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    pub sample_id: String,
    /// Single panel token, or several joined by `_` when the sample was
    /// sequenced against combined panels.
    pub panel_spec: String,
}

impl SampleRecord {
    pub fn panel_tokens(&self) -> Vec<&str> {
        self.panel_spec.split('_').collect()
    }
}

/// Target exon from a panel definition, 0-based half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub exon_id: String,
    pub gene: String,
    pub panel: String,
}

/// Run of constant depth from a full-resolution coverage track, 0-based half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub depth: f64,
}

impl DepthInterval {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}
