//! YouTube collaborators.
//!
//! Search, metadata and caption listing go through yt-dlp; caption payloads
//! are downloaded over HTTPS. Both sides sit behind traits so handlers can
//! be driven by fakes.

mod captions;
#[cfg(test)]
pub(crate) mod fakes;
mod video_id;
mod ytdlp;

pub use captions::{parse_json3, tracks_from_info, CaptionClient};
pub use video_id::{extract_video_id, VideoId};
pub use ytdlp::{metadata_from_info, YtDlp};

use crate::error::Result;
use crate::transcript::{TranscriptSegment, TranscriptTrack};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A flat search record as returned by yt-dlp.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub duration: Option<f64>,
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
}

/// Metadata for a single video. Only `video_id` is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Upload date as reported upstream (YYYYMMDD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Caption tracks of one video, plus whatever metadata came with the listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackListing {
    pub tracks: Vec<TranscriptTrack>,
    /// Set when the listing source already has the video's details.
    pub metadata: Option<VideoMetadata>,
}

/// Search and single-video extraction.
#[async_trait]
pub trait VideoSearcher: Send + Sync {
    /// Run a search directive (e.g. `ytsearch5:query`) and return flat hits.
    async fn search(&self, directive: &str) -> Result<Vec<SearchHit>>;

    /// Fetch metadata for one video.
    async fn fetch_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata>;
}

/// Transcript listing and download.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List available tracks. Fails with `TranscriptsDisabled` when the video
    /// has none at all.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<TrackListing>;

    /// Download the ordered segments of a track.
    async fn fetch_segments(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptSegment>>;
}
