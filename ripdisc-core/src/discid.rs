//! MusicBrainz DiscID encoding.
//!
//! The message is the uppercase hex string
//! `FF LL OOOOOOOO` followed by 99 eight-digit track offsets (unused slots
//! are zero). Its SHA-1 digest is Base64 encoded with padding, then
//! `+ / =` become `. _ -`.

use crate::log_parser::TrackEntry;
use crate::toc::{DiscIdError, TocSequence, MAX_TOC_OFFSET, MAX_TRACKS};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha1::{Digest, Sha1};
use tracing::debug;

/// Uppercase hex, left padded with zeros. Values too wide for `width`
/// keep only their rightmost digits, so callers check the range first.
fn hex_left_pad(value: u64, width: usize) -> String {
    let hex = format!("{:0width$X}", value, width = width);
    if hex.len() > width {
        hex[hex.len() - width..].to_string()
    } else {
        hex
    }
}

/// The fixed-length hex message hashed into the DiscID.
pub fn toc_message(toc: &TocSequence) -> Result<String, DiscIdError> {
    if toc.offsets.is_empty() {
        return Err(DiscIdError::InvalidDisc);
    }
    if toc.offsets.len() > MAX_TRACKS {
        return Err(DiscIdError::TooManyTracks(toc.offsets.len()));
    }
    if let Some(&wide) = std::iter::once(&toc.leadout_offset)
        .chain(&toc.offsets)
        .find(|n| **n > MAX_TOC_OFFSET)
    {
        return Err(DiscIdError::SectorOutOfRange(wide));
    }
    let mut message = String::with_capacity(4 + 8 * (MAX_TRACKS + 1));
    message.push_str(&hex_left_pad(u64::from(toc.first_track), 2));
    message.push_str(&hex_left_pad(u64::from(toc.last_track), 2));
    message.push_str(&hex_left_pad(toc.leadout_offset, 8));
    for slot in 0..MAX_TRACKS {
        let offset = toc.offsets.get(slot).copied().unwrap_or(0);
        message.push_str(&hex_left_pad(offset, 8));
    }
    Ok(message)
}

/// Compute the 28 character MusicBrainz DiscID for a TOC.
pub fn calculate_discid(toc: &TocSequence) -> Result<String, DiscIdError> {
    let message = toc_message(toc)?;
    let digest = Sha1::digest(message.as_bytes());
    let discid = STANDARD
        .encode(digest)
        .replace('+', ".")
        .replace('/', "_")
        .replace('=', "-");
    debug!("DiscID {} for TOC [{}]", discid, toc.to_toc_string());
    Ok(discid)
}

/// Shortcut for [`TocSequence::from_entries`] followed by [`calculate_discid`].
pub fn discid_for_entries(entries: &[TrackEntry]) -> Result<String, DiscIdError> {
    calculate_discid(&TocSequence::from_entries(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toc(numbers: &[u64]) -> TocSequence {
        TocSequence {
            first_track: numbers[0] as u32,
            last_track: numbers[1] as u32,
            leadout_offset: numbers[2],
            offsets: numbers[3..].to_vec(),
        }
    }

    #[test]
    fn test_two_track_discid() {
        let discid = calculate_discid(&toc(&[1, 2, 31950, 150, 13650])).unwrap();
        assert_eq!(discid, "j5lUSlIjdgNtdyhUFGcfAMg2odA-");
    }

    #[test]
    fn test_libdiscid_reference_disc() {
        let discid = calculate_discid(&toc(&[
            1, 22, 303602, 150, 9700, 25887, 39297, 53795, 63735, 77517, 94877, 107270, 123552,
            135522, 148422, 161197, 174790, 192022, 205545, 218010, 228700, 239590, 255470,
            266932, 288750,
        ]))
        .unwrap();
        assert_eq!(discid, "xUp1F2NkfP8s8jaeFn_Av3jNEI4-");
    }

    #[test]
    fn test_discid_shape() {
        let discid = calculate_discid(&toc(&[1, 3, 52261, 150, 17925, 34150])).unwrap();
        assert_eq!(discid.len(), 28);
        assert!(discid
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'));
    }

    #[test]
    fn test_discid_is_stable() {
        let t = toc(&[1, 3, 52261, 150, 17925, 34150]);
        assert_eq!(calculate_discid(&t).unwrap(), calculate_discid(&t).unwrap());
    }

    #[test]
    fn test_single_offset_change_changes_discid() {
        let a = calculate_discid(&toc(&[1, 3, 52261, 150, 17925, 34150])).unwrap();
        let b = calculate_discid(&toc(&[1, 3, 52261, 150, 17925, 34151])).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_message_layout() {
        let message = toc_message(&toc(&[1, 2, 31950, 150, 13650])).unwrap();
        assert_eq!(message.len(), 2 + 2 + 8 + 99 * 8);
        assert!(message.starts_with("010200007CCE0000009600003552"));
        assert!(message[28..].chars().all(|c| c == '0'));
    }

    #[test]
    fn test_hex_left_pad() {
        assert_eq!(hex_left_pad(0, 8), "00000000");
        assert_eq!(hex_left_pad(0xAB, 2), "AB");
        assert_eq!(hex_left_pad(31950, 8), "00007CCE");
        assert_eq!(hex_left_pad(0x1_2345_6789, 8), "23456789");
    }

    #[test]
    fn test_padded_hex_parses_back() {
        for value in [0u64, 1, 150, 0xFFFF, 359_999, 0xFFFF_FFFF] {
            let hex = hex_left_pad(value, 8);
            assert_eq!(hex.len(), 8);
            assert_eq!(u64::from_str_radix(&hex, 16).unwrap(), value);
        }
    }

    #[test]
    fn test_empty_toc_is_invalid() {
        assert_eq!(
            calculate_discid(&toc(&[1, 0, 150])),
            Err(DiscIdError::InvalidDisc)
        );
    }

    #[test]
    fn test_offset_wider_than_slot_rejected() {
        assert_eq!(
            toc_message(&toc(&[1, 1, 0x1_0000_1194, 0x1_0000_0096])),
            Err(DiscIdError::SectorOutOfRange(0x1_0000_1194))
        );
    }

    #[test]
    fn test_more_than_99_offsets_rejected() {
        let mut numbers = vec![1, 100, 1_000_000];
        numbers.extend((0..100u64).map(|i| 150 + i * 1000));
        assert_eq!(
            toc_message(&toc(&numbers)),
            Err(DiscIdError::TooManyTracks(100))
        );
    }

    #[test]
    fn test_entries_shortcut() {
        let entries = vec![
            TrackEntry {
                track_number: 1,
                time_start: "0:00".to_string(),
                time_length: "3:00".to_string(),
                start_sector: 0,
                end_sector: 13499,
            },
            TrackEntry {
                track_number: 2,
                time_start: "3:00".to_string(),
                time_length: "4:00".to_string(),
                start_sector: 13500,
                end_sector: 31799,
            },
        ];
        assert_eq!(
            discid_for_entries(&entries).unwrap(),
            "j5lUSlIjdgNtdyhUFGcfAMg2odA-"
        );
        assert_eq!(discid_for_entries(&[]), Err(DiscIdError::InvalidDisc));
    }
}
