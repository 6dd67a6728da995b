//! Configuration module for yt-transcriber.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    GeneralSettings, SearchSettings, Settings, TranscriptSettings, YoutubeSettings,
};
