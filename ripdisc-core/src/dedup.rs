use crate::discid::discid_for_entries;
use crate::log_parser::Disc;
use std::collections::HashSet;
use tracing::debug;

/// Drop discs whose DiscID was already seen, keeping first occurrences in order.
///
/// Two logs of the same release (e.g. a rip and a re-rip) yield the same
/// disc twice. Discs whose DiscID can't be computed are never duplicates
/// and are passed through for the caller to report.
pub fn dedup_discs(discs: Vec<Disc>) -> Vec<Disc> {
    let keyed: Vec<_> = discs
        .into_iter()
        .map(|disc| (discid_for_entries(&disc.entries).ok(), disc))
        .collect();
    dedup_by_discid(keyed, |(discid, _)| discid.as_deref())
        .into_iter()
        .map(|(_, disc)| disc)
        .collect()
}

/// Keep the first item for each DiscID, for items that already carry one.
///
/// `discid_of` returns None for items without a DiscID; those are always kept.
pub fn dedup_by_discid<T, F>(items: Vec<T>, discid_of: F) -> Vec<T>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match discid_of(item) {
            Some(discid) => {
                let first = seen.insert(discid.to_string());
                if !first {
                    debug!("Skipping duplicate disc {}", discid);
                }
                first
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_parser::TrackEntry;

    fn disc(ranges: &[(u64, u64)]) -> Disc {
        Disc::new(
            ranges
                .iter()
                .enumerate()
                .map(|(i, &(start_sector, end_sector))| TrackEntry {
                    track_number: i as u32 + 1,
                    time_start: "0:00.00".to_string(),
                    time_length: "0:00.00".to_string(),
                    start_sector,
                    end_sector,
                })
                .collect(),
        )
    }

    #[test]
    fn test_duplicate_disc_removed() {
        let a = disc(&[(0, 13499), (13500, 31799)]);
        let b = disc(&[(0, 9999), (10000, 19999), (20000, 29999)]);
        let deduped = dedup_discs(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(deduped, vec![a, b]);
    }

    #[test]
    fn test_time_columns_do_not_matter() {
        let a = disc(&[(0, 13499), (13500, 31799)]);
        let mut b = a.clone();
        b.entries[0].time_length = "3:00.00".to_string();
        assert_eq!(dedup_discs(vec![a.clone(), b]), vec![a]);
    }

    #[test]
    fn test_distinct_discs_kept() {
        let a = disc(&[(0, 13499)]);
        let b = disc(&[(0, 13500)]);
        assert_eq!(dedup_discs(vec![a.clone(), b.clone()]), vec![a, b]);
    }

    #[test]
    fn test_dedup_by_discid_keeps_payload() {
        let id = discid_for_entries(&disc(&[(0, 13499), (13500, 31799)]).entries).ok();
        let items = vec![("first", id.clone()), ("second", id), ("third", None)];
        let deduped = dedup_by_discid(items, |(_, discid)| discid.as_deref());
        let names: Vec<_> = deduped.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["first", "third"]);
    }

    #[test]
    fn test_discid_read_once_per_item() {
        let calls = std::cell::Cell::new(0);
        let items = vec!["a", "b", "a", "c", "b"];
        let deduped = dedup_by_discid(items, |id| {
            calls.set(calls.get() + 1);
            Some(*id)
        });
        assert_eq!(deduped, vec!["a", "b", "c"]);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_uncomputable_discs_pass_through() {
        let empty = Disc::default();
        assert_eq!(
            dedup_discs(vec![empty.clone(), empty.clone()]),
            vec![empty.clone(), empty]
        );
    }
}
