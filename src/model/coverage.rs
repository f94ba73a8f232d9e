use serde::Serialize;

/// Depth cut-offs reported for breadth of coverage. The first one is tested
/// with a strict `>`; the others with `>=`.
pub const DEPTH_THRESHOLDS: [f64; 5] = [0.0, 10.0, 20.0, 50.0, 100.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapWeighting {
    /// Weight each overlapping interval by its full length, boundary overhang included.
    #[default]
    Unclipped,
    /// Weight each overlapping interval by its intersection with the exon.
    Clipped,
}

impl OverlapWeighting {
    pub fn as_str(self) -> &'static str {
        match self {
            OverlapWeighting::Unclipped => "unclipped",
            OverlapWeighting::Clipped => "clipped",
        }
    }
}

/// Piece of a depth interval that overlapped a target exon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub length: u64,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CoverageStat {
    pub avg_depth: f64,
    pub pct_gt_0x: f64,
    pub pct_ge_10x: f64,
    pub pct_ge_20x: f64,
    pub pct_ge_50x: f64,
    pub pct_ge_100x: f64,
}

impl CoverageStat {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn breadth(&self) -> [f64; 5] {
        [
            self.pct_gt_0x,
            self.pct_ge_10x,
            self.pct_ge_20x,
            self.pct_ge_50x,
            self.pct_ge_100x,
        ]
    }
}

/// Fixed-point resolution of summed depth: one unit is a millionth of 1x.
pub const DEPTH_SCALE: f64 = 1_000_000.0;

/// Running sums behind a [`CoverageStat`]. All sums are integers, depth in
/// [`DEPTH_SCALE`] units, so the totals do not depend on the order fragments
/// are added in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageSums {
    pub total_bases: u64,
    pub depth_units: i128,
    pub bases_at: [u64; 5],
}

impl CoverageSums {
    pub fn from_fragments<'a, I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = &'a Fragment>,
    {
        let mut sums = Self::default();
        for fragment in fragments {
            sums.add(*fragment);
        }
        sums
    }

    pub fn add(&mut self, fragment: Fragment) {
        self.total_bases += fragment.length;
        self.depth_units += depth_to_units(fragment.depth) * i128::from(fragment.length);
        for (idx, &threshold) in DEPTH_THRESHOLDS.iter().enumerate() {
            if meets_threshold(fragment.depth, idx, threshold) {
                self.bases_at[idx] += fragment.length;
            }
        }
    }

    pub fn merge(&mut self, other: &CoverageSums) {
        self.total_bases += other.total_bases;
        self.depth_units += other.depth_units;
        for (dst, src) in self.bases_at.iter_mut().zip(other.bases_at.iter()) {
            *dst += *src;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_bases == 0
    }

    pub fn stat(&self) -> CoverageStat {
        if self.total_bases == 0 {
            return CoverageStat::zero();
        }
        let total = self.total_bases as f64;
        let frac = |idx: usize| self.bases_at[idx] as f64 / total;
        CoverageStat {
            avg_depth: self.depth_units as f64 / DEPTH_SCALE / total,
            pct_gt_0x: frac(0),
            pct_ge_10x: frac(1),
            pct_ge_20x: frac(2),
            pct_ge_50x: frac(3),
            pct_ge_100x: frac(4),
        }
    }
}

fn depth_to_units(depth: f64) -> i128 {
    (depth * DEPTH_SCALE).round() as i128
}

fn meets_threshold(depth: f64, idx: usize, threshold: f64) -> bool {
    if idx == 0 {
        depth > threshold
    } else {
        depth >= threshold
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/coverage.rs"]
mod tests;
