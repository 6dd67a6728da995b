//! yt-dlp search and extraction.

use super::{SearchHit, VideoId, VideoMetadata, VideoSearcher};
use crate::config::Settings;
use crate::error::{Result, TranscriberError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Thin wrapper around the yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    timeout: Duration,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.ytdlp_path(), settings.timeout())
    }

    /// Run yt-dlp in single-JSON mode against `target` without downloading.
    async fn dump_json(&self, extra_args: &[&str], target: &str) -> Result<Value> {
        debug!("Running {} on {}", self.program.display(), target);

        let mut command = Command::new(&self.program);
        command
            .args(["--dump-single-json", "--skip-download", "--no-warnings"])
            .args(extra_args)
            .arg("--")
            .arg(target)
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| TranscriberError::Timeout {
                operation: "yt-dlp".to_string(),
                seconds: self.timeout.as_secs(),
            })?;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TranscriberError::ToolNotFound("yt-dlp".into()));
            }
            Err(e) => {
                return Err(TranscriberError::ToolFailed(format!("Failed to run yt-dlp: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscriberError::ToolFailed(format!(
                "yt-dlp failed: {}",
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            TranscriberError::Upstream(format!("Failed to parse yt-dlp output: {}", e))
        })
    }

    /// Full single-video info dump, including caption listings.
    #[instrument(skip(self), fields(video_id = %video_id))]
    pub async fn video_info(&self, video_id: &VideoId) -> Result<Value> {
        self.dump_json(&["--no-playlist"], &video_id.watch_url()).await
    }
}

#[async_trait]
impl VideoSearcher for YtDlp {
    #[instrument(skip(self))]
    async fn search(&self, directive: &str) -> Result<Vec<SearchHit>> {
        let info = self.dump_json(&["--flat-playlist"], directive).await?;
        Ok(hits_from_info(&info))
    }

    async fn fetch_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        let info = self
            .video_info(video_id)
            .await
            .map_err(|e| TranscriberError::MetadataUnavailable(format!("{}: {}", video_id, e)))?;
        Ok(metadata_from_info(video_id, &info))
    }
}

/// Pull flat hits out of a playlist-style dump. Malformed entries are skipped.
fn hits_from_info(info: &Value) -> Vec<SearchHit> {
    let Some(entries) = info.get("entries").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| match serde_json::from_value::<SearchHit>(entry.clone()) {
            Ok(hit) => Some(hit),
            Err(e) => {
                debug!("Skipping malformed search entry: {}", e);
                None
            }
        })
        .collect()
}

/// Map a single-video dump to `VideoMetadata`.
pub fn metadata_from_info(video_id: &VideoId, info: &Value) -> VideoMetadata {
    let text = |key: &str| info[key].as_str().map(|s| s.to_string());

    VideoMetadata {
        video_id: text("id").unwrap_or_else(|| video_id.to_string()),
        title: text("title"),
        channel: text("uploader").or_else(|| text("channel")),
        upload_date: text("upload_date"),
        duration_seconds: info["duration"].as_f64(),
        view_count: info["view_count"].as_u64(),
        url: Some(video_id.watch_url()),
    }
}
