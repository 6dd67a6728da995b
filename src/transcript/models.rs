//! Data models for transcripts.

use crate::youtube::VideoMetadata;
use serde::{Deserialize, Serialize};

/// Origin of a transcript track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Automatic speech recognition captions.
    Generated,
    /// Captions uploaded by the video owner.
    Manual,
}

impl TrackKind {
    /// Kinds to try, most preferred first.
    pub fn preference_order(prefer_auto: bool) -> [TrackKind; 2] {
        if prefer_auto {
            [TrackKind::Generated, TrackKind::Manual]
        } else {
            [TrackKind::Manual, TrackKind::Generated]
        }
    }

    pub fn is_auto_generated(self) -> bool {
        matches!(self, TrackKind::Generated)
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Generated => write!(f, "generated"),
            TrackKind::Manual => write!(f, "manual"),
        }
    }
}

/// A transcript offered for one video, keyed by language and kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptTrack {
    /// Language code (e.g. "en", "pt-BR").
    pub language_code: String,
    /// Human readable language name, if the source reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
    /// Whether the track is auto-generated.
    pub is_auto_generated: bool,
    /// Where the caption payload can be downloaded from.
    #[serde(skip)]
    pub caption_url: Option<String>,
}

impl TranscriptTrack {
    /// Create a track with no name or payload location.
    pub fn new(language_code: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            language_code: language_code.into(),
            language_name: None,
            is_auto_generated: kind.is_auto_generated(),
            caption_url: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.language_name = name;
        self
    }

    pub fn with_caption_url(mut self, url: Option<String>) -> Self {
        self.caption_url = url;
        self
    }

    pub fn kind(&self) -> TrackKind {
        if self.is_auto_generated {
            TrackKind::Generated
        } else {
            TrackKind::Manual
        }
    }
}

/// One timed caption unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
        }
    }
}

/// A successfully fetched transcript.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub is_auto_generated: bool,
    pub transcript_text: String,
    /// Present only when timestamps were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TranscriptSegment>>,
    /// Present only when metadata was fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
}

/// Error-shaped transcript response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptFailure {
    pub error: String,
    /// Upstream-specific detail layered onto the documented error kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of `get_transcript`. The two shapes never mix.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TranscriptResult {
    Success(Transcript),
    Failure(TranscriptFailure),
}

impl TranscriptResult {
    pub fn failure(error: &str) -> Self {
        TranscriptResult::Failure(TranscriptFailure {
            error: error.to_string(),
            detail: None,
        })
    }

    pub fn failure_with_detail(error: &str, detail: String) -> Self {
        TranscriptResult::Failure(TranscriptFailure {
            error: error.to_string(),
            detail: Some(detail),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranscriptResult::Success(_))
    }

    /// The error message, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            TranscriptResult::Success(_) => None,
            TranscriptResult::Failure(failure) => Some(&failure.error),
        }
    }
}
