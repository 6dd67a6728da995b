//! Tool handlers for `search_videos` and `get_transcript`.
//!
//! Handlers validate and default their arguments, drive the collaborators,
//! and always hand back a response object. Failures inside a handler are
//! turned into error-shaped responses here and never reach the transport.

use crate::config::{SearchSettings, Settings, TranscriptSettings};
use crate::error::{Result, TranscriberError};
use crate::search::{build_query, parse_sort, SearchResponse};
use crate::transcript::{select_track, shape, TranscriptResult};
use crate::youtube::{
    extract_video_id, CaptionClient, TrackListing, TranscriptSource, VideoId, VideoMetadata,
    VideoSearcher, YtDlp,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Returned when the input is not a recognizable video URL or ID.
pub const INVALID_IDENTIFIER: &str = "Invalid video ID or URL";
/// Returned when the video has transcripts turned off.
pub const TRANSCRIPTS_DISABLED: &str = "No transcript available (disabled)";
/// Returned for every other transcript failure.
pub const NO_TRANSCRIPT: &str = "No transcript available";

/// Arguments of `search_videos`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Arguments of `get_transcript`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptArgs {
    pub url_or_id: String,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub prefer_auto: Option<bool>,
    #[serde(default)]
    pub include_timestamps: Option<bool>,
}

/// Request-scoped tool handlers.
pub struct ToolHandlers {
    searcher: Arc<dyn VideoSearcher>,
    transcripts: Arc<dyn TranscriptSource>,
    search: SearchSettings,
    transcript: TranscriptSettings,
}

impl ToolHandlers {
    /// Create handlers over custom collaborators.
    pub fn new(
        searcher: Arc<dyn VideoSearcher>,
        transcripts: Arc<dyn TranscriptSource>,
        settings: &Settings,
    ) -> Self {
        Self {
            searcher,
            transcripts,
            search: settings.search.clone(),
            transcript: settings.transcript.clone(),
        }
    }

    /// Create handlers backed by yt-dlp and the caption downloader.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let searcher = Arc::new(YtDlp::from_settings(settings));
        let transcripts = Arc::new(CaptionClient::from_settings(settings)?);
        Ok(Self::new(searcher, transcripts, settings))
    }

    /// Search videos by keyword.
    ///
    /// Only an unknown sort mode is an error. Upstream failures come back as a
    /// response with no items and an `error` message.
    #[instrument(skip(self, args), fields(query = %args.query))]
    pub async fn search_videos(&self, args: SearchArgs) -> Result<SearchResponse> {
        let sort = parse_sort(args.sort.as_deref())?;
        let limit = args.limit.unwrap_or(self.search.default_limit);
        let plan = build_query(&args.query, limit, sort);

        match self.searcher.search(&plan.directive).await {
            Ok(hits) => {
                let response = SearchResponse::from_hits(&args.query, &plan, hits);
                info!(
                    "Search returned {} items (sort {} -> {})",
                    response.items.len(),
                    response.sort_requested,
                    response.sort_effective
                );
                Ok(response)
            }
            Err(e) => {
                error!("search_videos failed: {}", e);
                Ok(SearchResponse::failed(&args.query, &plan, e.to_string()))
            }
        }
    }

    /// Fetch a transcript for a video URL or ID.
    #[instrument(skip(self, args), fields(input = %args.url_or_id))]
    pub async fn get_transcript(&self, args: TranscriptArgs) -> TranscriptResult {
        let video_id = match extract_video_id(&args.url_or_id) {
            Ok(id) => id,
            Err(e) => {
                warn!("{}", e);
                return TranscriptResult::failure(INVALID_IDENTIFIER);
            }
        };

        let lang = args
            .lang
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.transcript.default_language.clone());
        let prefer_auto = args.prefer_auto.unwrap_or(self.transcript.prefer_auto);
        let include_timestamps = args
            .include_timestamps
            .unwrap_or(self.transcript.include_timestamps);

        let TrackListing {
            tracks,
            metadata: listed_metadata,
        } = match self.transcripts.list_tracks(&video_id).await {
            Ok(listing) => listing,
            Err(e) => return failure_for(e),
        };

        let track = match select_track(video_id.as_str(), &tracks, &lang, prefer_auto) {
            Ok(track) => track,
            Err(e) => return failure_for(e),
        };
        info!(
            "Selected {} track for {} ({})",
            track.kind(),
            lang,
            video_id
        );

        let segments = match self.transcripts.fetch_segments(track).await {
            Ok(segments) => segments,
            Err(e) => return failure_for(e),
        };

        // The listing usually carries metadata already; only look it up when it doesn't.
        let metadata = match (self.transcript.fetch_metadata, listed_metadata) {
            (false, _) => None,
            (true, Some(metadata)) => Some(metadata),
            (true, None) => self.lookup_metadata(&video_id).await,
        };

        shape(
            video_id.as_str(),
            track,
            segments,
            include_timestamps,
            metadata,
        )
    }

    /// Best-effort metadata lookup; failures are logged and dropped.
    async fn lookup_metadata(&self, video_id: &VideoId) -> Option<VideoMetadata> {
        match self.searcher.fetch_metadata(video_id).await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("Omitting metadata: {}", e);
                None
            }
        }
    }
}

/// Map an error to the documented transcript error shape.
fn failure_for(err: TranscriberError) -> TranscriptResult {
    match &err {
        TranscriberError::InvalidIdentifier(_) => TranscriptResult::failure(INVALID_IDENTIFIER),
        TranscriberError::TranscriptsDisabled(video_id) => {
            info!("Transcripts disabled for {}", video_id);
            TranscriptResult::failure(TRANSCRIPTS_DISABLED)
        }
        TranscriberError::NoMatchingTrack { .. } => {
            info!("{}", err);
            TranscriptResult::failure(NO_TRANSCRIPT)
        }
        _ => {
            error!("get_transcript failed: {}", err);
            TranscriptResult::failure_with_detail(NO_TRANSCRIPT, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SortMode;
    use crate::transcript::{TrackKind, TranscriptSegment, TranscriptTrack};
    use crate::youtube::fakes::{FakeSearcher, FakeTranscripts, Listing};
    use crate::youtube::SearchHit;

    const VIDEO: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 1.0, "hello"),
            TranscriptSegment::new(1.0, 1.0, "there"),
            TranscriptSegment::new(2.0, 1.5, "world"),
        ]
    }

    fn both_kinds() -> Listing {
        Listing::Tracks(vec![
            TranscriptTrack::new("en", TrackKind::Manual),
            TranscriptTrack::new("en", TrackKind::Generated),
        ])
    }

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: Some("Never Gonna Give You Up".to_string()),
            ..VideoMetadata::default()
        }
    }

    fn handlers(searcher: FakeSearcher, transcripts: FakeTranscripts) -> ToolHandlers {
        ToolHandlers::new(Arc::new(searcher), Arc::new(transcripts), &Settings::default())
    }

    fn transcript_args(input: &str) -> TranscriptArgs {
        TranscriptArgs {
            url_or_id: input.to_string(),
            lang: None,
            prefer_auto: None,
            include_timestamps: None,
        }
    }

    fn search_args(query: &str, limit: Option<i64>, sort: Option<&str>) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            limit,
            sort: sort.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_transcript_success() {
        let searcher = FakeSearcher {
            metadata: Some(metadata()),
            ..FakeSearcher::default()
        };
        let handlers = handlers(searcher, FakeTranscripts::new(both_kinds(), segments()));

        let result = handlers.get_transcript(transcript_args(VIDEO)).await;
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["video_id"], "dQw4w9WgXcQ");
        assert_eq!(value["language"], "en");
        assert_eq!(value["is_auto_generated"], true);
        assert_eq!(value["transcript_text"], "hello there world");
        assert!(value.get("segments").is_none());
        assert_eq!(value["metadata"]["title"], "Never Gonna Give You Up");
        assert!(value.get("error").is_none());
    }

    #[tokio::test]
    async fn test_get_transcript_prefers_manual_when_asked() {
        let transcripts = Arc::new(FakeTranscripts::new(both_kinds(), segments()));
        let handlers = ToolHandlers::new(
            Arc::new(FakeSearcher::default()),
            transcripts.clone(),
            &Settings::default(),
        );

        let args = TranscriptArgs {
            prefer_auto: Some(false),
            ..transcript_args("dQw4w9WgXcQ")
        };
        let result = handlers.get_transcript(args).await;

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["is_auto_generated"], false);

        let fetched = transcripts.fetched.lock().unwrap();
        assert_eq!(fetched.len(), 1);
        assert!(!fetched[0].is_auto_generated);
    }

    #[tokio::test]
    async fn test_get_transcript_with_timestamps() {
        let handlers = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(both_kinds(), segments()),
        );
        let args = TranscriptArgs {
            include_timestamps: Some(true),
            ..transcript_args(VIDEO)
        };

        let value = serde_json::to_value(handlers.get_transcript(args).await).unwrap();
        assert_eq!(value["segments"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_identifier() {
        let handlers = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(both_kinds(), segments()),
        );

        let result = handlers.get_transcript(transcript_args("not a url")).await;
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "Invalid video ID or URL" }));
    }

    #[tokio::test]
    async fn test_disabled_transcripts() {
        let handlers = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(Listing::Disabled, vec![]),
        );

        let result = handlers.get_transcript(transcript_args(VIDEO)).await;
        assert_eq!(result.error(), Some("No transcript available (disabled)"));
    }

    #[tokio::test]
    async fn test_no_track_in_language() {
        let handlers = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(both_kinds(), segments()),
        );
        let args = TranscriptArgs {
            lang: Some("ja".to_string()),
            ..transcript_args(VIDEO)
        };

        let result = handlers.get_transcript(args).await;
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "No transcript available" }));
    }

    #[tokio::test]
    async fn test_upstream_failure_carries_detail() {
        let handlers = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(Listing::Broken, vec![]),
        );

        let result = handlers.get_transcript(transcript_args(VIDEO)).await;
        match result {
            TranscriptResult::Failure(failure) => {
                assert_eq!(failure.error, "No transcript available");
                assert!(failure.detail.unwrap().contains("Timed out"));
            }
            TranscriptResult::Success(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_metadata_failure_does_not_fail_transcript() {
        let with_metadata = handlers(
            FakeSearcher {
                metadata: Some(metadata()),
                ..FakeSearcher::default()
            },
            FakeTranscripts::new(both_kinds(), segments()),
        );
        let without_metadata = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(both_kinds(), segments()),
        );

        let ok = with_metadata.get_transcript(transcript_args(VIDEO)).await;
        let degraded = without_metadata.get_transcript(transcript_args(VIDEO)).await;

        assert!(ok.is_success());
        assert!(degraded.is_success());

        let mut ok = serde_json::to_value(&ok).unwrap();
        let degraded = serde_json::to_value(&degraded).unwrap();
        assert!(degraded.get("metadata").is_none());

        ok.as_object_mut().unwrap().remove("metadata");
        assert_eq!(ok, degraded);
    }

    #[tokio::test]
    async fn test_listing_metadata_avoids_second_lookup() {
        let searcher = Arc::new(FakeSearcher {
            metadata: Some(VideoMetadata {
                title: Some("From a second lookup".to_string()),
                ..metadata()
            }),
            ..FakeSearcher::default()
        });
        let transcripts =
            FakeTranscripts::new(both_kinds(), segments()).with_metadata(metadata());
        let handlers = ToolHandlers::new(
            searcher.clone(),
            Arc::new(transcripts),
            &Settings::default(),
        );

        let value = serde_json::to_value(handlers.get_transcript(transcript_args(VIDEO)).await).unwrap();
        assert_eq!(value["metadata"]["title"], "Never Gonna Give You Up");
        assert_eq!(*searcher.metadata_lookups.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_metadata_skipped_when_disabled_in_settings() {
        let mut settings = Settings::default();
        settings.transcript.fetch_metadata = false;
        let handlers = ToolHandlers::new(
            Arc::new(FakeSearcher {
                metadata: Some(metadata()),
                ..FakeSearcher::default()
            }),
            Arc::new(FakeTranscripts::new(both_kinds(), segments())),
            &settings,
        );

        let value = serde_json::to_value(handlers.get_transcript(transcript_args(VIDEO)).await).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[tokio::test]
    async fn test_search_videos_defaults() {
        let searcher = Arc::new(FakeSearcher {
            hits: vec![SearchHit {
                id: Some("dQw4w9WgXcQ".to_string()),
                title: Some("Never Gonna Give You Up".to_string()),
                ..SearchHit::default()
            }],
            ..FakeSearcher::default()
        });
        let handlers = ToolHandlers::new(
            searcher.clone(),
            Arc::new(FakeTranscripts::new(both_kinds(), vec![])),
            &Settings::default(),
        );

        let response = handlers
            .search_videos(search_args("rick astley", None, None))
            .await
            .unwrap();

        assert_eq!(response.limit, 5);
        assert_eq!(response.sort_requested, SortMode::Relevance);
        assert_eq!(response.items.len(), 1);
        assert_eq!(
            searcher.directives.lock().unwrap().as_slice(),
            ["ytsearch5:rick astley".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_videos_views_fallback_and_clamp() {
        let searcher = Arc::new(FakeSearcher {
            hits: vec![SearchHit {
                id: Some("dQw4w9WgXcQ".to_string()),
                ..SearchHit::default()
            }],
            ..FakeSearcher::default()
        });
        let handlers = ToolHandlers::new(
            searcher.clone(),
            Arc::new(FakeTranscripts::new(both_kinds(), vec![])),
            &Settings::default(),
        );

        let response = handlers
            .search_videos(search_args("q", Some(50), Some("views")))
            .await
            .unwrap();

        assert_eq!(response.limit, 10);
        assert_eq!(response.sort_effective, SortMode::Relevance);
        assert_eq!(
            searcher.directives.lock().unwrap().as_slice(),
            ["ytsearch10:q".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_videos_invalid_sort() {
        let handlers = handlers(
            FakeSearcher::default(),
            FakeTranscripts::new(both_kinds(), vec![]),
        );

        let err = handlers
            .search_videos(search_args("q", None, Some("rating")))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriberError::InvalidSort(_)));
    }

    #[tokio::test]
    async fn test_search_videos_upstream_failure() {
        let handlers = handlers(
            FakeSearcher {
                fail_search: true,
                ..FakeSearcher::default()
            },
            FakeTranscripts::new(both_kinds(), vec![]),
        );

        let response = handlers
            .search_videos(search_args("q", Some(3), Some("date")))
            .await
            .unwrap();

        assert!(response.items.is_empty());
        assert_eq!(response.sort_effective, SortMode::Date);
        assert!(response.error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_failed_views_search_falls_back_to_relevance() {
        let handlers = handlers(
            FakeSearcher {
                fail_search: true,
                ..FakeSearcher::default()
            },
            FakeTranscripts::new(both_kinds(), vec![]),
        );

        let response = handlers
            .search_videos(search_args("q", None, Some("views")))
            .await
            .unwrap();

        assert!(response.items.is_empty());
        assert_eq!(response.sort_requested, SortMode::Views);
        assert_eq!(response.sort_effective, SortMode::Relevance);
        assert!(response.error.is_some());
    }
}
