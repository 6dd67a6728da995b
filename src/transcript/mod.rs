//! Transcript selection and shaping.
//!
//! Picks which caption track to fetch for a video and turns the fetched
//! segments into the `get_transcript` response.

mod models;
mod selector;
mod shaper;

pub use models::{
    TrackKind, Transcript, TranscriptFailure, TranscriptResult, TranscriptSegment,
    TranscriptTrack,
};
pub use selector::select_track;
pub use shaper::{join_segments, shape};
