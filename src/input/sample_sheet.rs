use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, warn};

use crate::input::{InputError, open_maybe_gz};
use crate::model::records::SampleRecord;

pub const SECTION_MARKER: &str = "Cloud_Data";
pub const PANEL_COLUMN: &str = "Description";
pub const CONTROL_PREFIX: &str = "PC";
pub const FILL_MARKER: &str = "FILL";

const DELIMITER: char = ',';

/// Samples listed in the `[Cloud_Data]` section of an Illumina V2 sample sheet,
/// in sheet order, keyed by sample id.
#[derive(Debug, Clone, Default)]
pub struct SampleSheet {
    records: Vec<SampleRecord>,
    by_id: HashMap<String, usize>,
}

impl SampleSheet {
    pub fn from_records(records: Vec<SampleRecord>) -> Self {
        let mut sheet = SampleSheet::default();
        for record in records {
            sheet.insert(record);
        }
        sheet
    }

    fn insert(&mut self, record: SampleRecord) -> bool {
        if self.by_id.contains_key(&record.sample_id) {
            return false;
        }
        self.by_id
            .insert(record.sample_id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn get(&self, sample_id: &str) -> Option<&SampleRecord> {
        self.by_id.get(sample_id).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Process-control and placeholder rows never reach the index.
pub fn is_excluded_sample(sample_id: &str) -> bool {
    sample_id.starts_with(CONTROL_PREFIX) || sample_id.contains(FILL_MARKER)
}

pub fn parse_sample_sheet(path: &Path) -> Result<SampleSheet, InputError> {
    let reader = open_maybe_gz(path)?;
    parse_sample_sheet_from(reader, path)
}

pub fn parse_sample_sheet_from<R: BufRead>(
    mut reader: R,
    path: &Path,
) -> Result<SampleSheet, InputError> {
    let malformed = |reason: &str| InputError::MalformedManifest {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut buf = String::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Err(malformed("no [Cloud_Data] section"));
        }
        line_no += 1;
        if buf.contains(SECTION_MARKER) {
            break;
        }
    }

    buf.clear();
    if reader.read_line(&mut buf)? == 0 {
        return Err(malformed("[Cloud_Data] section has no header row"));
    }
    line_no += 1;
    let header = strip_row(&buf);
    let last_col = header.rsplit(DELIMITER).next().unwrap_or("");
    if last_col != PANEL_COLUMN {
        return Err(malformed(&format!(
            "last [Cloud_Data] column is {last_col:?}, expected {PANEL_COLUMN:?}"
        )));
    }

    let mut sheet = SampleSheet::default();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let row = strip_row(&buf);
        if row.is_empty() {
            break;
        }
        let fields: Vec<&str> = row.split(DELIMITER).collect();
        let sample_id = fields[0].trim();
        let panel_spec = fields[fields.len() - 1].trim();
        if sample_id.is_empty() {
            warn!("sample sheet row without sample id; skipping (line {line_no})");
            continue;
        }
        if is_excluded_sample(sample_id) {
            debug!("skipping control/fill sample {sample_id} (line {line_no})");
            continue;
        }
        let record = SampleRecord {
            sample_id: sample_id.to_string(),
            panel_spec: panel_spec.to_string(),
        };
        if !sheet.insert(record) {
            warn!("duplicate sample id in sample sheet; keeping first (line {line_no}, sample {sample_id})");
        }
    }

    Ok(sheet)
}

fn strip_row(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
        .trim_end_matches(DELIMITER)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/sample_sheet.rs"]
mod tests;
