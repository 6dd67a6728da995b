//! Transcript command implementation.

use super::FAILURE_EXIT_CODE;
use crate::cli::output::{format_duration, format_timestamp, format_upload_date};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::handlers::{ToolHandlers, TranscriptArgs};
use crate::transcript::{Transcript, TranscriptResult};
use anyhow::Result;

/// Fetch a transcript and print it.
pub async fn run_transcript(
    input: &str,
    lang: Option<String>,
    manual: bool,
    timestamps: bool,
    json: bool,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Transcript, &settings)?;

    let handlers = ToolHandlers::from_settings(&settings)?;
    let spinner = (!json).then(|| Output::spinner("Fetching transcript..."));

    let result = handlers
        .get_transcript(TranscriptArgs {
            url_or_id: input.to_string(),
            lang,
            prefer_auto: manual.then_some(false),
            include_timestamps: Some(timestamps),
        })
        .await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        match &result {
            TranscriptResult::Success(transcript) => print_transcript(transcript),
            TranscriptResult::Failure(failure) => {
                Output::error(&failure.error);
                if let Some(detail) = &failure.detail {
                    Output::kv("Detail", detail);
                }
            }
        }
    }

    if let Some(code) = exit_code(&result) {
        std::process::exit(code);
    }
    Ok(())
}

/// Non-zero status for a failed lookup, in both output modes.
fn exit_code(result: &TranscriptResult) -> Option<i32> {
    (!result.is_success()).then_some(FAILURE_EXIT_CODE)
}

fn print_transcript(transcript: &Transcript) {
    let kind = if transcript.is_auto_generated {
        "auto-generated"
    } else {
        "manual"
    };

    match transcript.metadata.as_ref().and_then(|m| m.title.as_deref()) {
        Some(title) => Output::header(title),
        None => Output::header(&transcript.video_id),
    }

    if let Some(metadata) = &transcript.metadata {
        if let Some(channel) = &metadata.channel {
            Output::kv("Channel", channel);
        }
        if let Some(date) = &metadata.upload_date {
            Output::kv("Uploaded", &format_upload_date(date));
        }
        if let Some(duration) = metadata.duration_seconds {
            Output::kv("Duration", &format_duration(duration));
        }
    }
    Output::kv("Language", &format!("{} ({})", transcript.language, kind));
    println!();

    match &transcript.segments {
        Some(segments) => {
            for segment in segments {
                println!("[{}] {}", format_timestamp(segment.start), segment.text);
            }
        }
        None => println!("{}", transcript.transcript_text),
    }
}
