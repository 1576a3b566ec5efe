use crate::log_parser::{Disc, TrackEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Sector gap some rippers report between the last audio track and a
/// trailing data track (enhanced CD / CD-Extra).
pub const DATA_TRACK_GAP: i128 = 11400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscLayout {
    /// Contiguous tracks.
    Standard,
    /// Audio tracks followed by one data track.
    WithData,
    /// Gaps that match no known layout. Tracks are kept as-is.
    Unknown,
}

fn sector_gap(current: &TrackEntry, next: &TrackEntry) -> i128 {
    i128::from(next.start_sector) - i128::from(current.end_sector) - 1
}

/// Classify a disc by the gaps between consecutive entries.
pub fn classify_layout(entries: &[TrackEntry]) -> DiscLayout {
    let last_pair = entries.len().saturating_sub(2);
    let mut layout = DiscLayout::Standard;
    for (i, pair) in entries.windows(2).enumerate() {
        let gap = sector_gap(&pair[0], &pair[1]);
        if gap == 0 {
            continue;
        }
        if i == last_pair && gap == DATA_TRACK_GAP {
            layout = DiscLayout::WithData;
        } else {
            debug!(
                "Unexpected gap of {} sectors between tracks {} and {}",
                gap, pair[0].track_number, pair[1].track_number
            );
            return DiscLayout::Unknown;
        }
    }
    layout
}

/// Classify a disc and drop its data track if it has one.
pub fn strip_data_track(mut disc: Disc) -> (DiscLayout, Disc) {
    let layout = classify_layout(&disc.entries);
    match layout {
        DiscLayout::WithData => {
            if let Some(data_track) = disc.entries.pop() {
                debug!("Dropping data track {}", data_track.track_number);
            }
        }
        DiscLayout::Unknown => {
            warn!(
                "Disc with {} entries has an unknown layout, keeping all tracks",
                disc.len()
            );
        }
        DiscLayout::Standard => {}
    }
    (layout, disc)
}
