//! In-memory collaborators for tests.

use super::{SearchHit, TrackListing, TranscriptSource, VideoId, VideoMetadata, VideoSearcher};
use crate::error::{Result, TranscriberError};
use crate::transcript::{TranscriptSegment, TranscriptTrack};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeSearcher {
    pub hits: Vec<SearchHit>,
    pub fail_search: bool,
    pub metadata: Option<VideoMetadata>,
    pub directives: Mutex<Vec<String>>,
    pub metadata_lookups: Mutex<usize>,
}

#[async_trait]
impl VideoSearcher for FakeSearcher {
    async fn search(&self, directive: &str) -> Result<Vec<SearchHit>> {
        self.directives.lock().unwrap().push(directive.to_string());
        if self.fail_search {
            return Err(TranscriberError::ToolFailed("yt-dlp failed: HTTP Error 503".into()));
        }
        Ok(self.hits.clone())
    }

    async fn fetch_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        *self.metadata_lookups.lock().unwrap() += 1;
        self.metadata
            .clone()
            .ok_or_else(|| TranscriberError::MetadataUnavailable(video_id.to_string()))
    }
}

pub(crate) enum Listing {
    Tracks(Vec<TranscriptTrack>),
    Disabled,
    Broken,
}

pub(crate) struct FakeTranscripts {
    pub listing: Listing,
    pub segments: Vec<TranscriptSegment>,
    pub metadata: Option<VideoMetadata>,
    pub fetched: Mutex<Vec<TranscriptTrack>>,
}

impl FakeTranscripts {
    pub fn new(listing: Listing, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            listing,
            segments,
            metadata: None,
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_metadata(mut self, metadata: VideoMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<TrackListing> {
        match &self.listing {
            Listing::Tracks(tracks) => Ok(TrackListing {
                tracks: tracks.clone(),
                metadata: self.metadata.clone(),
            }),
            Listing::Disabled => Err(TranscriberError::TranscriptsDisabled(video_id.to_string())),
            Listing::Broken => Err(TranscriberError::Timeout {
                operation: "yt-dlp".into(),
                seconds: 60,
            }),
        }
    }

    async fn fetch_segments(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptSegment>> {
        self.fetched.lock().unwrap().push(track.clone());
        Ok(self.segments.clone())
    }
}
