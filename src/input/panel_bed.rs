use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, open_maybe_gz};
use crate::model::records::ExonRecord;

/// Reads a panel definition: tab-separated `chrom start end exon_id gene`,
/// no header. Extra trailing columns are ignored.
pub fn load_panel_bed(path: &Path, panel_id: &str) -> Result<Vec<ExonRecord>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut exons = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.is_empty() || is_bed_comment(line) {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 5 {
            return Err(InputError::parse(
                path,
                line_no,
                format!("expected 5 columns, found {}", cols.len()),
            ));
        }
        let start: u64 = cols[1]
            .trim()
            .parse()
            .map_err(|_| InputError::parse(path, line_no, "invalid start coordinate"))?;
        let end: u64 = cols[2]
            .trim()
            .parse()
            .map_err(|_| InputError::parse(path, line_no, "invalid end coordinate"))?;
        if start >= end {
            return Err(InputError::parse(
                path,
                line_no,
                format!("start {start} is not below end {end}"),
            ));
        }
        exons.push(ExonRecord {
            chrom: cols[0].trim().to_string(),
            start,
            end,
            exon_id: cols[3].trim().to_string(),
            gene: cols[4].trim().to_string(),
            panel: panel_id.to_string(),
        });
    }

    Ok(exons)
}

pub(crate) fn is_bed_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}
