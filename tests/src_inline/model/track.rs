use super::*;

fn iv(chrom: &str, start: u64, end: u64, depth: f64) -> DepthInterval {
    DepthInterval {
        chrom: chrom.to_string(),
        start,
        end,
        depth,
    }
}

fn collect(track: &CoverageTrack, chrom: &str, start: u64, end: u64) -> Vec<(u64, u64)> {
    track
        .overlapping(chrom, start, end)
        .map(|i| (i.start, i.end))
        .collect()
}

#[test]
fn test_sorted_on_construction() {
    let track = CoverageTrack::from_intervals(vec![
        iv("chr2", 0, 10, 1.0),
        iv("chr1", 50, 60, 1.0),
        iv("chr1", 0, 50, 1.0),
    ]);
    let keys: Vec<(&str, u64)> = track
        .intervals()
        .iter()
        .map(|i| (i.chrom.as_str(), i.start))
        .collect();
    assert_eq!(keys, vec![("chr1", 0), ("chr1", 50), ("chr2", 0)]);
    assert_eq!(track.chromosomes(), vec!["chr1", "chr2"]);
}

#[test]
fn test_interval_starting_before_query_is_found() {
    let track = CoverageTrack::from_intervals(vec![
        iv("chr1", 0, 100, 30.0),
        iv("chr1", 100, 200, 5.0),
    ]);
    assert_eq!(collect(&track, "chr1", 40, 60), vec![(0, 100)]);
    assert_eq!(collect(&track, "chr1", 90, 150), vec![(0, 100), (100, 200)]);
}

#[test]
fn test_step_back_does_not_cross_chromosome() {
    let track = CoverageTrack::from_intervals(vec![
        iv("chr1", 0, 1000, 30.0),
        iv("chr2", 0, 50, 7.0),
        iv("chr2", 50, 100, 9.0),
    ]);
    assert_eq!(collect(&track, "chr2", 0, 100), vec![(0, 50), (50, 100)]);
}

#[test]
fn test_first_interval_of_track_is_reachable() {
    let track = CoverageTrack::from_intervals(vec![
        iv("chr1", 0, 50, 30.0),
        iv("chrX", 0, 50, 1.0),
    ]);
    assert_eq!(collect(&track, "chr1", 0, 10), vec![(0, 50)]);
}

#[test]
fn test_interval_touching_query_end_is_reported() {
    let track = CoverageTrack::from_intervals(vec![
        iv("chr1", 0, 100, 30.0),
        iv("chr1", 100, 200, 5.0),
        iv("chr1", 201, 300, 5.0),
    ]);
    assert_eq!(collect(&track, "chr1", 10, 100), vec![(0, 100), (100, 200)]);
}

#[test]
fn test_interval_ending_at_query_start_is_excluded() {
    let track = CoverageTrack::from_intervals(vec![
        iv("chr1", 0, 100, 30.0),
        iv("chr1", 100, 200, 5.0),
    ]);
    assert_eq!(collect(&track, "chr1", 100, 150), vec![(100, 200)]);
}

#[test]
fn test_missing_chromosome_yields_nothing() {
    let track = CoverageTrack::from_intervals(vec![iv("chr1", 0, 100, 30.0)]);
    assert!(collect(&track, "chr3", 0, 100).is_empty());
    assert!(collect(&CoverageTrack::default(), "chr1", 0, 100).is_empty());
}
