use crate::toc::TocSequence;

pub const DEFAULT_ATTACH_BASE_URL: &str = "https://musicbrainz.org/cdtoc/attach";

/// Build a MusicBrainz "attach CD TOC" link for a disc.
///
/// Artist and release names prefill the search form when known.
pub fn attach_url(
    base_url: &str,
    toc: &TocSequence,
    artist: Option<&str>,
    release: Option<&str>,
) -> String {
    let numbers = toc
        .numbers()
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("%20");
    let mut url = format!("{}?toc={}", base_url, numbers);
    if let Some(artist) = artist {
        url.push_str("&artist-name=");
        url.push_str(&urlencoding::encode(artist));
    }
    if let Some(release) = release {
        url.push_str("&release-name=");
        url.push_str(&urlencoding::encode(release));
    }
    url
}
