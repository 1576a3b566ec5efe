//! Legacy FreeDB/CDDB disc identifier.
//!
//! Not used by MusicBrainz lookups, kept for tools that still key on it.

use crate::log_parser::TrackEntry;
use crate::toc::{DiscIdError, PREGAP, SECTORS_PER_SECOND};

fn sum_of_digits(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Compute the 32-bit CDDB id as uppercase hex (no zero padding).
pub fn calculate_cddb_id(entries: &[TrackEntry]) -> Result<String, DiscIdError> {
    let (first, last) = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(DiscIdError::InvalidDisc),
    };
    let length_seconds =
        last.end_sector.saturating_add(1).saturating_sub(first.start_sector) / SECTORS_PER_SECOND;
    let checksum: u64 = entries
        .iter()
        .map(|e| sum_of_digits(e.start_sector.saturating_add(PREGAP) / SECTORS_PER_SECOND))
        .sum();
    let id = (((checksum % 255) as u32) << 24)
        | ((length_seconds as u32) << 8)
        | entries.len() as u32;
    Ok(format!("{:X}", id))
}
