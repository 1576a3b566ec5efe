use crate::dedup::dedup_by_discid;
use crate::discid::calculate_discid;
use crate::layout::{strip_data_track, DiscLayout};
use crate::log_parser::{parse_log, Disc, TrackEntry};
use crate::toc::{DiscIdError, TocSequence};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A disc found in the logs, with its DiscID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscReport {
    /// 1-based, counted over the deduplicated discs.
    pub disc_number: usize,
    pub layout: DiscLayout,
    /// Entries in the log before the data track was dropped.
    pub raw_track_count: usize,
    /// Audio entries the TOC was computed from.
    pub entries: Vec<TrackEntry>,
    pub toc: TocSequence,
    pub discid: String,
}

/// A disc for which no DiscID could be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDisc {
    pub disc_number: usize,
    pub layout: DiscLayout,
    pub error: DiscIdError,
}

#[derive(Debug, Clone, Default)]
pub struct LogAnalysis {
    pub reports: Vec<DiscReport>,
    pub skipped: Vec<SkippedDisc>,
}

impl LogAnalysis {
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty() && self.skipped.is_empty()
    }
}

struct ClassifiedDisc {
    layout: DiscLayout,
    raw_track_count: usize,
    audio: Disc,
    identified: Result<(TocSequence, String), DiscIdError>,
}

impl ClassifiedDisc {
    fn new(disc: Disc) -> Self {
        let raw_track_count = disc.len();
        let (layout, audio) = strip_data_track(disc);
        let identified = TocSequence::from_entries(&audio.entries).and_then(|toc| {
            let discid = calculate_discid(&toc)?;
            Ok((toc, discid))
        });
        Self {
            layout,
            raw_track_count,
            audio,
            identified,
        }
    }

    fn discid(&self) -> Option<&str> {
        self.identified
            .as_ref()
            .ok()
            .map(|(_, discid)| discid.as_str())
    }
}

fn report_for(disc_number: usize, disc: ClassifiedDisc) -> Result<DiscReport, SkippedDisc> {
    match disc.identified {
        Ok((toc, discid)) => Ok(DiscReport {
            disc_number,
            layout: disc.layout,
            raw_track_count: disc.raw_track_count,
            entries: disc.audio.entries,
            toc,
            discid,
        }),
        Err(error) => Err(SkippedDisc {
            disc_number,
            layout: disc.layout,
            error,
        }),
    }
}

/// Analyze a single ripping log.
pub fn analyze_log(text: &str) -> LogAnalysis {
    analyze_logs([text])
}

/// Analyze several logs of one release together.
///
/// Discs are collected in input order and deduplicated across all logs,
/// so the same disc ripped twice is reported once.
pub fn analyze_logs<'a, I>(texts: I) -> LogAnalysis
where
    I: IntoIterator<Item = &'a str>,
{
    let classified: Vec<_> = texts
        .into_iter()
        .flat_map(parse_log)
        .map(ClassifiedDisc::new)
        .collect();

    let mut analysis = LogAnalysis::default();
    for (i, disc) in dedup_by_discid(classified, ClassifiedDisc::discid)
        .into_iter()
        .enumerate()
    {
        match report_for(i + 1, disc) {
            Ok(report) => {
                info!("Disc {}: DiscID {}", report.disc_number, report.discid);
                analysis.reports.push(report);
            }
            Err(skipped) => {
                warn!("Disc {}: skipped, {}", skipped.disc_number, skipped.error);
                analysis.skipped.push(skipped);
            }
        }
    }
    analysis
}
