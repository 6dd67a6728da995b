//! Transcript track selection.

use super::models::{TrackKind, TranscriptTrack};
use crate::error::{Result, TranscriberError};

/// Pick the track to fetch for `lang`.
///
/// The preferred kind is tried first, then the other kind, both in the exact
/// requested language. There is no fallback to other languages.
pub fn select_track<'a>(
    video_id: &str,
    tracks: &'a [TranscriptTrack],
    lang: &str,
    prefer_auto: bool,
) -> Result<&'a TranscriptTrack> {
    if tracks.is_empty() {
        return Err(TranscriberError::TranscriptsDisabled(video_id.to_string()));
    }

    TrackKind::preference_order(prefer_auto)
        .into_iter()
        .find_map(|kind| {
            tracks
                .iter()
                .find(|t| t.kind() == kind && t.language_code.eq_ignore_ascii_case(lang))
        })
        .ok_or_else(|| TranscriberError::NoMatchingTrack {
            video_id: video_id.to_string(),
            language: lang.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks() -> Vec<TranscriptTrack> {
        vec![
            TranscriptTrack::new("en", TrackKind::Manual),
            TranscriptTrack::new("de", TrackKind::Generated),
            TranscriptTrack::new("en", TrackKind::Generated),
        ]
    }

    #[test]
    fn test_prefer_auto_selects_generated() {
        let tracks = tracks();
        let track = select_track("vid", &tracks, "en", true).unwrap();
        assert!(track.is_auto_generated);
        assert_eq!(track.language_code, "en");
    }

    #[test]
    fn test_prefer_manual_selects_manual() {
        let tracks = tracks();
        let track = select_track("vid", &tracks, "en", false).unwrap();
        assert!(!track.is_auto_generated);
    }

    #[test]
    fn test_falls_back_to_other_kind() {
        let tracks = tracks();

        // Only a generated German track exists
        let track = select_track("vid", &tracks, "de", false).unwrap();
        assert!(track.is_auto_generated);

        let manual_only = vec![TranscriptTrack::new("fr", TrackKind::Manual)];
        let track = select_track("vid", &manual_only, "fr", true).unwrap();
        assert!(!track.is_auto_generated);
    }

    #[test]
    fn test_language_match_ignores_case() {
        let tracks = vec![TranscriptTrack::new("pt-BR", TrackKind::Manual)];
        assert!(select_track("vid", &tracks, "pt-br", true).is_ok());
    }

    #[test]
    fn test_no_cross_language_fallback() {
        let tracks = tracks();
        let err = select_track("vid", &tracks, "es", true).unwrap_err();
        assert!(matches!(err, TranscriberError::NoMatchingTrack { ref language, .. } if language == "es"));
    }

    #[test]
    fn test_empty_tracks_means_disabled() {
        let err = select_track("vid", &[], "en", true).unwrap_err();
        assert!(matches!(err, TranscriberError::TranscriptsDisabled(_)));
    }
}
