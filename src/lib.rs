//! yt-transcriber - YouTube search and transcripts for AI assistants
//!
//! An MCP server that lets an assistant search YouTube by keyword and pull
//! the caption transcript of a video as plain text or timed segments.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `youtube` - Video identifiers and the yt-dlp / caption collaborators
//! - `search` - Search directives, sort handling and result mapping
//! - `transcript` - Track selection and transcript shaping
//! - `handlers` - The two tool operations, independent of transport
//! - `mcp` - JSON-RPC 2.0 server over stdio
//!
//! # Example
//!
//! ```rust,no_run
//! use yt_transcriber::config::Settings;
//! use yt_transcriber::handlers::{ToolHandlers, TranscriptArgs};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let handlers = ToolHandlers::from_settings(&settings)?;
//!
//!     let result = handlers
//!         .get_transcript(TranscriptArgs {
//!             url_or_id: "https://youtu.be/dQw4w9WgXcQ".to_string(),
//!             lang: None,
//!             prefer_auto: None,
//!             include_timestamps: None,
//!         })
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mcp;
pub mod search;
pub mod transcript;
pub mod youtube;

pub use error::{Result, TranscriberError};
