//! Error types for yt-transcriber.

use thiserror::Error;

/// Library-level error type for yt-transcriber operations.
#[derive(Error, Debug)]
pub enum TranscriberError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid video ID or URL: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid sort mode: {0} (expected relevance, views or date)")]
    InvalidSort(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No {language} transcript found for video {video_id}")]
    NoMatchingTrack { video_id: String, language: String },

    #[error("Metadata unavailable for video {0}")]
    MetadataUnavailable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Timed out after {seconds}s waiting for {operation}")]
    Timeout { operation: String, seconds: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),
}

/// Result type alias for yt-transcriber operations.
pub type Result<T> = std::result::Result<T, TranscriberError>;
