use std::cmp::Ordering;

use crate::model::records::DepthInterval;

/// Depth intervals sorted ascending by `(chrom, start)`.
///
/// The ordering is established once in [`CoverageTrack::from_intervals`] and is what
/// makes [`CoverageTrack::overlapping`] a binary search plus a short forward scan.
#[derive(Debug, Clone, Default)]
pub struct CoverageTrack {
    intervals: Vec<DepthInterval>,
}

impl CoverageTrack {
    pub fn from_intervals(mut intervals: Vec<DepthInterval>) -> Self {
        intervals.sort_by(compare_intervals);
        Self { intervals }
    }

    pub fn intervals(&self) -> &[DepthInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Index of the first interval that can overlap `chrom:start`.
    ///
    /// Lands on the first interval whose `(chrom, start)` is not below the query,
    /// then steps back one so an interval starting before the query is not missed.
    /// The step back never crosses into the previous chromosome.
    pub fn scan_start(&self, chrom: &str, start: u64) -> usize {
        let idx = self
            .intervals
            .partition_point(|iv| (iv.chrom.as_str(), iv.start) < (chrom, start));
        if idx > 0 && self.intervals[idx - 1].chrom == chrom {
            idx - 1
        } else {
            idx
        }
    }

    /// Intervals on `chrom` with `end > start` and `start <= end` of the query.
    ///
    /// An interval starting exactly at the query end is reported; callers that
    /// weight by clipped length see it as a zero-length fragment.
    pub fn overlapping<'a>(
        &'a self,
        chrom: &'a str,
        start: u64,
        end: u64,
    ) -> impl Iterator<Item = &'a DepthInterval> + 'a {
        self.intervals[self.scan_start(chrom, start)..]
            .iter()
            .take_while(move |iv| iv.chrom == chrom && iv.start <= end)
            .filter(move |iv| iv.end > start)
    }

    pub fn chromosomes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for iv in &self.intervals {
            if out.last().is_none_or(|last| *last != iv.chrom) {
                out.push(iv.chrom.as_str());
            }
        }
        out
    }
}

fn compare_intervals(a: &DepthInterval, b: &DepthInterval) -> Ordering {
    a.chrom
        .cmp(&b.chrom)
        .then(a.start.cmp(&b.start))
        .then(a.end.cmp(&b.end))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/track.rs"]
mod tests;
