//! MusicBrainz DiscID computation from CD ripping logs.
//!
//! Pipeline: log text -> [`log_parser`] -> [`layout`] -> [`toc`] ->
//! [`discid`] -> [`dedup`]. [`analyze`] wires the stages together.

pub mod analyze;
pub mod attach;
pub mod cddb;
pub mod dedup;
pub mod discid;
pub mod layout;
pub mod log_parser;
pub mod lookup;
pub mod text_encoding;
pub mod toc;

pub use analyze::{analyze_log, analyze_logs, DiscReport, LogAnalysis, SkippedDisc};
pub use attach::{attach_url, DEFAULT_ATTACH_BASE_URL};
pub use cddb::calculate_cddb_id;
pub use dedup::{dedup_by_discid, dedup_discs};
pub use discid::{calculate_discid, discid_for_entries};
pub use layout::{classify_layout, strip_data_track, DiscLayout, DATA_TRACK_GAP};
pub use log_parser::{parse_log, Disc, TrackEntry};
pub use lookup::{lookup_url, resolve_all, DiscIdLookup, LookupOutcome};
pub use toc::{DiscIdError, TocSequence, MAX_TRACKS, PREGAP, SECTORS_PER_SECOND};
