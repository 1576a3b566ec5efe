use crate::config::Config;
use ripdisc_core::{attach_url, calculate_cddb_id, DiscLayout, DiscReport, LogAnalysis};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonDisc<'a> {
    #[serde(flatten)]
    report: &'a DiscReport,
    toc_string: String,
    attach_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cddb_id: Option<String>,
}

#[derive(Serialize)]
struct JsonSkipped {
    disc_number: usize,
    layout: DiscLayout,
    reason: String,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    discs: Vec<JsonDisc<'a>>,
    skipped: Vec<JsonSkipped>,
}

fn attach_url_for(report: &DiscReport, config: &Config) -> String {
    attach_url(
        &config.attach_base_url,
        &report.toc,
        config.artist.as_deref(),
        config.release.as_deref(),
    )
}

fn cddb_id_for(report: &DiscReport, config: &Config) -> Option<String> {
    if config.cddb {
        calculate_cddb_id(&report.entries).ok()
    } else {
        None
    }
}

pub fn render_text(analysis: &LogAnalysis, config: &Config) -> String {
    let multi_disc = analysis.reports.len() + analysis.skipped.len() > 1;
    let mut out = String::new();
    for report in &analysis.reports {
        if multi_disc {
            let _ = write!(out, "Disc {}: ", report.disc_number);
        }
        let _ = writeln!(out, "{}", report.discid);
        let _ = writeln!(out, "  TOC: {}", report.toc.to_toc_string());
        let _ = writeln!(out, "  Attach: {}", attach_url_for(report, config));
        if let Some(cddb_id) = cddb_id_for(report, config) {
            let _ = writeln!(out, "  CDDB: {}", cddb_id);
        }
        match report.layout {
            DiscLayout::WithData => {
                let _ = writeln!(
                    out,
                    "  Data track excluded ({} of {} entries used)",
                    report.entries.len(),
                    report.raw_track_count
                );
            }
            DiscLayout::Unknown => {
                let _ = writeln!(
                    out,
                    "  Warning: unexpected gaps between tracks, DiscID may be wrong"
                );
            }
            DiscLayout::Standard => {}
        }
    }
    for skipped in &analysis.skipped {
        let _ = writeln!(out, "Disc {}: skipped ({})", skipped.disc_number, skipped.error);
    }
    out
}

pub fn render_json(analysis: &LogAnalysis, config: &Config) -> serde_json::Result<String> {
    let output = JsonOutput {
        discs: analysis
            .reports
            .iter()
            .map(|report| JsonDisc {
                report,
                toc_string: report.toc.to_toc_string(),
                attach_url: attach_url_for(report, config),
                cddb_id: cddb_id_for(report, config),
            })
            .collect(),
        skipped: analysis
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                disc_number: s.disc_number,
                layout: s.layout,
                reason: s.error.to_string(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
}
