//! Turns fetched segments into the `get_transcript` response.

use super::models::{Transcript, TranscriptResult, TranscriptSegment, TranscriptTrack};
use crate::youtube::VideoMetadata;

/// Join segment texts with single spaces, in order.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the success response for a selected track.
///
/// `segments` is kept only when `include_timestamps` is set; `metadata` is
/// merged as given.
pub fn shape(
    video_id: &str,
    track: &TranscriptTrack,
    segments: Vec<TranscriptSegment>,
    include_timestamps: bool,
    metadata: Option<VideoMetadata>,
) -> TranscriptResult {
    let transcript_text = join_segments(&segments);

    TranscriptResult::Success(Transcript {
        video_id: video_id.to_string(),
        language: track.language_code.clone(),
        is_auto_generated: track.is_auto_generated,
        transcript_text,
        segments: include_timestamps.then_some(segments),
        metadata,
    })
}
