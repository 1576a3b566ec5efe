//! Seam for checking computed DiscIDs against the MusicBrainz database.
//!
//! The core does no networking. Callers plug in a [`DiscIdLookup`] that
//! talks to the web service (or a cache, or a test double).

use crate::analyze::DiscReport;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DISCID_WS_URL: &str = "https://musicbrainz.org/ws/2/discid/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "message")]
pub enum LookupOutcome {
    Found,
    NotFound,
    /// Transport or service failure. Says nothing about the DiscID.
    LookupError(String),
}

#[async_trait]
pub trait DiscIdLookup: Send + Sync {
    async fn lookup(&self, discid: &str) -> LookupOutcome;
}

/// Web service URL for a DiscID, without CD stubs.
pub fn lookup_url(discid: &str) -> String {
    format!("{}{}?cdstubs=no", DISCID_WS_URL, discid)
}

/// Look up every report's DiscID and pair it with the outcome, keeping order.
pub async fn resolve_all<L>(
    lookup: &L,
    reports: Vec<DiscReport>,
) -> Vec<(DiscReport, LookupOutcome)>
where
    L: DiscIdLookup + ?Sized,
{
    let outcomes = join_all(reports.iter().map(|r| lookup.lookup(&r.discid))).await;
    reports
        .into_iter()
        .zip(outcomes)
        .map(|(report, outcome)| {
            match &outcome {
                LookupOutcome::LookupError(e) => {
                    warn!("Lookup of DiscID {} failed: {}", report.discid, e)
                }
                _ => debug!("DiscID {}: {:?}", report.discid, outcome),
            }
            (report, outcome)
        })
        .collect()
}
