use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use memmap2::Mmap;

use crate::input::panel_bed::is_bed_comment;
use crate::input::{InputError, is_gzip, open_maybe_gz, require_file};
use crate::model::records::DepthInterval;
use crate::model::track::CoverageTrack;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackLoadStats {
    pub records_read: usize,
    pub records_kept: usize,
}

/// Loads a full-resolution depth track (`chrom start end depth`), keeping only
/// intervals on `allowed` chromosomes.
pub fn load_depth_track(
    path: &Path,
    allowed: &BTreeSet<String>,
) -> Result<(CoverageTrack, TrackLoadStats), InputError> {
    require_file(path)?;
    let mut stats = TrackLoadStats::default();
    let mut intervals = Vec::new();

    if is_gzip(path) {
        let mut reader = open_maybe_gz(path)?;
        let mut buf = String::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            line_no += 1;
            push_line(&buf, line_no, path, allowed, &mut stats, &mut intervals)?;
        }
    } else {
        let file = File::open(path)?;
        if file.metadata()?.len() > 0 {
            let mmap = unsafe { Mmap::map(&file)? };
            for (idx, raw) in mmap.split(|&b| b == b'\n').enumerate() {
                let line = std::str::from_utf8(raw)
                    .map_err(|_| InputError::parse(path, idx + 1, "line is not valid UTF-8"))?;
                push_line(line, idx + 1, path, allowed, &mut stats, &mut intervals)?;
            }
        }
    }

    stats.records_kept = intervals.len();
    Ok((CoverageTrack::from_intervals(intervals), stats))
}

fn push_line(
    raw: &str,
    line_no: usize,
    path: &Path,
    allowed: &BTreeSet<String>,
    stats: &mut TrackLoadStats,
    out: &mut Vec<DepthInterval>,
) -> Result<(), InputError> {
    let line = raw.trim_end();
    if line.is_empty() || is_bed_comment(line) {
        return Ok(());
    }
    stats.records_read += 1;

    let mut cols = line.split('\t');
    let chrom = cols.next().unwrap_or("");
    if !allowed.contains(chrom) {
        return Ok(());
    }
    let (Some(start), Some(end), Some(depth)) = (cols.next(), cols.next(), cols.next()) else {
        return Err(InputError::parse(path, line_no, "expected 4 columns"));
    };
    let start: u64 = start
        .trim()
        .parse()
        .map_err(|_| InputError::parse(path, line_no, "invalid start coordinate"))?;
    let end: u64 = end
        .trim()
        .parse()
        .map_err(|_| InputError::parse(path, line_no, "invalid end coordinate"))?;
    let depth: f64 = depth
        .trim()
        .parse()
        .map_err(|_| InputError::parse(path, line_no, "invalid depth value"))?;
    if end < start {
        return Err(InputError::parse(
            path,
            line_no,
            format!("end {end} is below start {start}"),
        ));
    }

    out.push(DepthInterval {
        chrom: chrom.to_string(),
        start,
        end,
        depth,
    });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/depth_track.rs"]
mod tests;
