//! MCP tool definitions.

use super::protocol::Tool;
use crate::search::{MAX_LIMIT, MIN_LIMIT};
use serde_json::json;

pub const SEARCH_VIDEOS: &str = "search_videos";
pub const GET_TRANSCRIPT: &str = "get_transcript";

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_VIDEOS.to_string(),
            description: "Search YouTube videos by keyword. Returns basic metadata for each hit \
                and reports which sort order was actually honored (sort_effective)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (clamped to 1-10)",
                        "minimum": MIN_LIMIT,
                        "maximum": MAX_LIMIT,
                        "default": 5
                    },
                    "sort": {
                        "type": "string",
                        "enum": ["relevance", "views", "date"],
                        "description": "Result ordering. 'views' falls back to relevance when \
                            view counts are unavailable.",
                        "default": "relevance"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: GET_TRANSCRIPT.to_string(),
            description: "Fetch the transcript of a YouTube video by URL or video ID. \
                Supports watch URLs, youtu.be links, shorts URLs and bare 11-character IDs."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url_or_id": {
                        "type": "string",
                        "description": "YouTube URL or video ID"
                    },
                    "lang": {
                        "type": "string",
                        "description": "Transcript language code",
                        "default": "en"
                    },
                    "prefer_auto": {
                        "type": "boolean",
                        "description": "Prefer auto-generated captions over manual ones",
                        "default": true
                    },
                    "include_timestamps": {
                        "type": "boolean",
                        "description": "Include timed segments (start, duration, text)",
                        "default": false
                    }
                },
                "required": ["url_or_id"]
            }),
        },
    ]
}
