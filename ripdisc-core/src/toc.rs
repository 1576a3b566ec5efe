use crate::log_parser::TrackEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sectors prepended to every position (2 seconds of lead-in).
pub const PREGAP: u64 = 150;
/// CD-DA frames per second.
pub const SECTORS_PER_SECOND: u64 = 75;
/// Track slots in the DiscID message.
pub const MAX_TRACKS: usize = 99;
/// Largest TOC number that fits an 8 digit hex slot.
pub const MAX_TOC_OFFSET: u64 = 0xFFFF_FFFF;
/// Largest end sector whose leadout offset still fits a slot.
pub const MAX_END_SECTOR: u64 = MAX_TOC_OFFSET - PREGAP - 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscIdError {
    #[error("Disc has no audio tracks")]
    InvalidDisc,
    #[error("Disc has {0} tracks, at most 99 are supported")]
    TooManyTracks(usize),
    #[error("Sector {0} is beyond the range a TOC can hold")]
    SectorOutOfRange(u64),
}

fn toc_offset(sector: u64, extra: u64) -> Result<u64, DiscIdError> {
    sector
        .checked_add(extra)
        .filter(|offset| *offset <= MAX_TOC_OFFSET)
        .ok_or(DiscIdError::SectorOutOfRange(sector))
}

/// MusicBrainz TOC numbers for one disc.
///
/// Serialized form of [`TocSequence::numbers`] is
/// `[first_track, last_track, leadout_offset, offset_1, ..., offset_N]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TocSequence {
    pub first_track: u32,
    pub last_track: u32,
    pub leadout_offset: u64,
    pub offsets: Vec<u64>,
}

impl TocSequence {
    /// Build the TOC from audio entries (data track already removed).
    pub fn from_entries(entries: &[TrackEntry]) -> Result<Self, DiscIdError> {
        let last = entries.last().ok_or(DiscIdError::InvalidDisc)?;
        if entries.len() > MAX_TRACKS {
            return Err(DiscIdError::TooManyTracks(entries.len()));
        }
        Ok(Self {
            first_track: 1,
            last_track: entries.len() as u32,
            leadout_offset: toc_offset(last.end_sector, PREGAP + 1)?,
            offsets: entries
                .iter()
                .map(|e| toc_offset(e.start_sector, PREGAP))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn numbers(&self) -> Vec<u64> {
        let mut numbers = Vec::with_capacity(self.offsets.len() + 3);
        numbers.push(u64::from(self.first_track));
        numbers.push(u64::from(self.last_track));
        numbers.push(self.leadout_offset);
        numbers.extend_from_slice(&self.offsets);
        numbers
    }

    /// Space separated numbers, as accepted by the MusicBrainz `toc` parameter.
    pub fn to_toc_string(&self) -> String {
        self.numbers()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
