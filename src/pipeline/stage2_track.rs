use std::path::Path;

use tracing::{info, warn};

use crate::input::InputError;
use crate::input::depth_track::{TrackLoadStats, load_depth_track};
use crate::model::track::CoverageTrack;
use crate::panels::PanelTarget;

#[derive(Debug)]
pub struct Stage2Output {
    pub track: CoverageTrack,
    pub stats: TrackLoadStats,
}

/// Loads the depth track restricted to the chromosomes the panel touches.
pub fn run_stage2(track_path: &Path, target: &PanelTarget) -> Result<Stage2Output, InputError> {
    let chromosomes = target.chromosomes();
    info!(
        "reading full resolution coverage {} for {} chromosomes",
        track_path.display(),
        chromosomes.len()
    );
    let (track, stats) = load_depth_track(track_path, &chromosomes)?;
    info!("coverage records before filtering: {}", stats.records_read);
    info!(
        "coverage records after filtering: {} on {} chromosomes",
        track.len(),
        track.chromosomes().len()
    );
    if track.is_empty() {
        warn!(
            "no coverage records on the chromosomes of panel {}",
            target.panel_id
        );
    }
    Ok(Stage2Output { track, stats })
}
