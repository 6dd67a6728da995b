//! Caption track listing and download.

use super::{metadata_from_info, TrackListing, TranscriptSource, VideoId, YtDlp};
use crate::config::Settings;
use crate::error::{Result, TranscriberError};
use crate::transcript::{TrackKind, TranscriptSegment, TranscriptTrack};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

/// Caption payload format we know how to parse.
const CAPTION_EXT: &str = "json3";

/// Listing key in yt-dlp output that is chat replay, not captions.
const LIVE_CHAT: &str = "live_chat";

/// Suffix yt-dlp puts on the untranslated automatic caption track.
const ORIGINAL_SUFFIX: &str = "-orig";

/// Lists tracks through yt-dlp and downloads json3 payloads with reqwest.
pub struct CaptionClient {
    ytdlp: YtDlp,
    http: reqwest::Client,
}

impl CaptionClient {
    pub fn new(ytdlp: YtDlp, http: reqwest::Client) -> Self {
        Self { ytdlp, http }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self::new(YtDlp::from_settings(settings), http))
    }
}

#[async_trait]
impl TranscriptSource for CaptionClient {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn list_tracks(&self, video_id: &VideoId) -> Result<TrackListing> {
        let info = self.ytdlp.video_info(video_id).await?;
        let tracks = tracks_from_info(&info);

        if tracks.is_empty() {
            return Err(TranscriberError::TranscriptsDisabled(video_id.to_string()));
        }

        debug!("Found {} caption tracks", tracks.len());
        Ok(TrackListing {
            tracks,
            metadata: Some(metadata_from_info(video_id, &info)),
        })
    }

    #[instrument(skip(self, track), fields(lang = %track.language_code, auto = track.is_auto_generated))]
    async fn fetch_segments(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptSegment>> {
        let url = track.caption_url.as_deref().ok_or_else(|| {
            TranscriberError::Upstream(format!(
                "No {} caption payload offered for {}",
                CAPTION_EXT, track.language_code
            ))
        })?;

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_json3(&body)?;
        info!("Fetched {} segments", segments.len());
        Ok(segments)
    }
}

/// Collect manual (`subtitles`) and generated (`automatic_captions`) tracks
/// from a yt-dlp single-video dump.
pub fn tracks_from_info(info: &Value) -> Vec<TranscriptTrack> {
    let mut tracks = Vec::new();

    for (key, kind) in [
        ("subtitles", TrackKind::Manual),
        ("automatic_captions", TrackKind::Generated),
    ] {
        let Some(listing) = info.get(key).and_then(Value::as_object) else {
            continue;
        };

        // `<lang>-orig` is the untranslated ASR track; list it ahead of its twin.
        let mut entries: Vec<_> = listing.iter().collect();
        entries.sort_by_key(|(language, _)| !language.ends_with(ORIGINAL_SUFFIX));

        for (language, formats) in entries {
            if language == LIVE_CHAT {
                continue;
            }
            let formats = formats.as_array().map(Vec::as_slice).unwrap_or_default();
            if formats.is_empty() {
                continue;
            }

            let language = language.strip_suffix(ORIGINAL_SUFFIX).unwrap_or(language);
            if kind == TrackKind::Generated && is_translated(formats) {
                continue;
            }
            if tracks
                .iter()
                .any(|t: &TranscriptTrack| t.kind() == kind && t.language_code == language)
            {
                continue;
            }

            let payload = formats.iter().find(|f| f["ext"] == CAPTION_EXT);
            let name = formats
                .iter()
                .find_map(|f| f["name"].as_str())
                .map(str::to_string);

            tracks.push(
                TranscriptTrack::new(language, kind)
                    .with_name(name)
                    .with_caption_url(payload.and_then(|f| f["url"].as_str()).map(str::to_string)),
            );
        }
    }

    tracks
}

/// Whether a generated listing entry is a machine translation of another
/// language's captions. Translations carry a `tlang` that differs from `lang`.
fn is_translated(formats: &[Value]) -> bool {
    let Some(url) = formats
        .iter()
        .find_map(|f| f["url"].as_str())
        .and_then(|u| Url::parse(u).ok())
    else {
        return false;
    };

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    match (param("tlang"), param("lang")) {
        (Some(target), Some(source)) => !target.eq_ignore_ascii_case(&source),
        (Some(_), None) => true,
        (None, _) => false,
    }
}

#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: f64,
    #[serde(default)]
    d_duration_ms: f64,
    #[serde(default)]
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 caption payload into ordered segments.
///
/// Each event with text becomes one segment. Line breaks fold to spaces and
/// events that are blank after trimming are dropped.
pub fn parse_json3(body: &str) -> Result<Vec<TranscriptSegment>> {
    let payload: Json3 = serde_json::from_str(body)?;

    let segments = payload
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            (!text.is_empty()).then(|| {
                TranscriptSegment::new(event.t_start_ms / 1000.0, event.d_duration_ms / 1000.0, text)
            })
        })
        .collect();

    Ok(segments)
}
