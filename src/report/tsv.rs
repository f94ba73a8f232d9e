use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::pipeline::stage3_exons::ExonCoverage;
use crate::pipeline::stage4_aggregate::{GeneCoverage, PanelCoverage};
use crate::report::{STAT_COLUMNS, stat_fields};

pub fn exon_header() -> Vec<&'static str> {
    let mut header = vec!["sample", "chrom", "start", "end", "exon_id", "gene", "panel"];
    header.extend(STAT_COLUMNS);
    header
}

pub fn gene_header() -> Vec<&'static str> {
    let mut header = vec!["sample", "gene"];
    header.extend(STAT_COLUMNS);
    header.push("panel");
    header
}

pub fn panel_header() -> Vec<&'static str> {
    let mut header = vec!["sample", "panel"];
    header.extend(STAT_COLUMNS);
    header
}

pub fn exon_rows(sample: &str, exons: &[ExonCoverage]) -> Vec<Vec<String>> {
    exons
        .iter()
        .map(|ec| {
            let mut row = vec![
                sample.to_string(),
                ec.exon.chrom.clone(),
                ec.exon.start.to_string(),
                ec.exon.end.to_string(),
                ec.exon.exon_id.clone(),
                ec.exon.gene.clone(),
                ec.exon.panel.clone(),
            ];
            row.extend(stat_fields(&ec.stat));
            row
        })
        .collect()
}

pub fn gene_rows(sample: &str, panel_id: &str, genes: &[GeneCoverage]) -> Vec<Vec<String>> {
    genes
        .iter()
        .map(|gc| {
            let mut row = vec![sample.to_string(), gc.gene.clone()];
            row.extend(stat_fields(&gc.stat));
            row.push(panel_id.to_string());
            row
        })
        .collect()
}

pub fn panel_rows(sample: &str, panel: &PanelCoverage) -> Vec<Vec<String>> {
    let mut row = vec![sample.to_string(), panel.panel_id.clone()];
    row.extend(stat_fields(&panel.stat));
    vec![row]
}

/// Refuses an existing table at `path` whose first line is not `header`.
/// Returns whether the table already holds a header.
pub fn check_table_header(path: &Path, header: &[&str]) -> io::Result<bool> {
    if !path.exists() || path.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut first = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first)?;
    if first.trim_end_matches(['\r', '\n']) != header.join("\t") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} has an unexpected header", path.display()),
        ));
    }
    Ok(true)
}

/// Appends `rows` to the table at `path`, writing `header` first when the file
/// is new. An existing table with a different header is refused.
pub fn append_table(path: &Path, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let existing = check_table_header(path, header)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut w = BufWriter::new(file);
    if !existing {
        writeln!(w, "{}", header.join("\t"))?;
    }
    for row in rows {
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}
