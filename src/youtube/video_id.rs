//! Video identifier extraction.

use crate::error::{Result, TranscriberError};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

static ID_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"));

/// Hosts (after stripping `www.`) that serve watch and shorts pages.
const WATCH_HOSTS: &[&str] = &["youtube.com", "m.youtube.com", "music.youtube.com"];

/// Host of the short-link form.
const SHORT_HOST: &str = "youtu.be";

/// A canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Accept a token only if it has the identifier shape.
    pub fn parse(token: &str) -> Option<Self> {
        ID_SHAPE
            .is_match(token)
            .then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract a video ID from a watch URL, short link, shorts URL or bare ID.
///
/// Forms are tried in that order. Anything else is `InvalidIdentifier`.
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();
    let invalid = || TranscriberError::InvalidIdentifier(input.to_string());

    if let Some(url) = parse_youtube_url(input) {
        return candidate_from_url(&url)
            .and_then(|candidate| VideoId::parse(&candidate))
            .ok_or_else(invalid);
    }

    VideoId::parse(input).ok_or_else(invalid)
}

/// Parse the input as a URL, allowing a missing scheme on YouTube hosts.
fn parse_youtube_url(input: &str) -> Option<Url> {
    if input.contains("://") {
        return Url::parse(input).ok();
    }

    let lower = input.to_ascii_lowercase();
    let bare_host = lower.strip_prefix("www.").unwrap_or(&lower);
    let looks_like_host = WATCH_HOSTS
        .iter()
        .chain(std::iter::once(&SHORT_HOST))
        .any(|host| bare_host.starts_with(&format!("{}/", host)));

    if looks_like_host {
        Url::parse(&format!("https://{}", input)).ok()
    } else {
        None
    }
}

/// Pull the raw ID candidate out of a YouTube URL. Query and fragment noise
/// never reaches the candidate since only the path or `v` param is read.
fn candidate_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if WATCH_HOSTS.contains(&host) {
        // 1. watch?v=<id>
        if url.path() == "/watch" {
            return url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned());
        }

        // 3. /shorts/<id>
        let mut segments = url.path_segments()?;
        if segments.next()? == "shorts" {
            return segments.next().map(str::to_string);
        }
        return None;
    }

    // 2. youtu.be/<id>
    if host == SHORT_HOST {
        return url
            .path_segments()?
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
    }

    None
}
