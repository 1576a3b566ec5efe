use crate::toc::MAX_END_SECTOR;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// One row of the TOC table printed by EAC/XLD style rippers.
///
/// Format: `       10  | 37:42.72 |  4:14.43 |    169722    |   188814`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEntry {
    pub track_number: u32,
    /// Display-only, never interpreted.
    pub time_start: String,
    /// Display-only, never interpreted.
    pub time_length: String,
    pub start_sector: u64,
    /// Inclusive.
    pub end_sector: u64,
}

/// The TOC rows of one rip, in the order they appear in the log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Disc {
    pub entries: Vec<TrackEntry>,
}

impl Disc {
    pub fn new(entries: Vec<TrackEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn toc_row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(\d+)\s*\|\s*([0-9:.]+)\s*\|\s*([0-9:.]+)\s*\|\s*(\d+)\s*\|\s*(\d+)\s*$",
        )
        .expect("TOC row pattern is valid")
    })
}

/// Parse a single log line as a TOC row.
///
/// Returns None for prose, headers, separators, and rows whose numbers
/// don't fit a TOC or violate `end_sector >= start_sector`.
fn parse_toc_row(line: &str) -> Option<TrackEntry> {
    let caps = toc_row_pattern().captures(line)?;
    let track_number = caps[1].parse::<u32>().ok().filter(|n| *n > 0)?;
    let start_sector = caps[4].parse::<u64>().ok()?;
    let end_sector = caps[5].parse::<u64>().ok()?;
    if end_sector > MAX_END_SECTOR {
        debug!(
            "Ignoring TOC row for track {}: end sector {} out of range",
            track_number, end_sector
        );
        return None;
    }
    if end_sector < start_sector {
        debug!(
            "Ignoring TOC row for track {}: end sector {} before start sector {}",
            track_number, end_sector, start_sector
        );
        return None;
    }
    Some(TrackEntry {
        track_number,
        time_start: caps[2].to_string(),
        time_length: caps[3].to_string(),
        start_sector,
        end_sector,
    })
}

/// Extract every disc from a ripping log.
///
/// A row numbered 1 starts a new disc, so logs of multi-disc releases
/// ripped one after another yield one [`Disc`] each. Lines that are not
/// TOC rows are skipped.
pub fn parse_log(text: &str) -> Vec<Disc> {
    let mut discs = Vec::new();
    let mut entries: Vec<TrackEntry> = Vec::new();
    for line in text.lines() {
        let Some(entry) = parse_toc_row(line) else {
            continue;
        };
        if entry.track_number == 1 && !entries.is_empty() {
            debug!("Track 1 found, closing disc with {} entries", entries.len());
            discs.push(Disc::new(std::mem::take(&mut entries)));
        }
        debug!(
            "  Track {} sectors {}..={}",
            entry.track_number, entry.start_sector, entry.end_sector
        );
        entries.push(entry);
    }
    if !entries.is_empty() {
        discs.push(Disc::new(entries));
    }
    debug!("Found {} disc(s) in log", discs.len());
    discs
}
