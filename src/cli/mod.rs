//! CLI module for yt-transcriber.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// yt-transcriber - YouTube search and transcripts for AI assistants
///
/// Runs as an MCP server over stdio, or answers one-off queries from the shell.
#[derive(Parser, Debug)]
#[command(name = "yt-transcriber")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "YT_TRANSCRIBER_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the MCP server on stdio (for Claude and other MCP hosts)
    Serve,

    /// Search YouTube videos
    Search {
        /// Search query
        query: String,

        /// Maximum number of results (1-10)
        #[arg(short, long)]
        limit: Option<i64>,

        /// Sort order (relevance, views, date)
        #[arg(short, long, default_value = "relevance")]
        sort: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Fetch the transcript of a video
    Transcript {
        /// YouTube URL or video ID
        input: String,

        /// Transcript language code
        #[arg(short, long)]
        lang: Option<String>,

        /// Prefer manually created captions over auto-generated ones
        #[arg(long)]
        manual: bool,

        /// Include timed segments
        #[arg(short, long)]
        timestamps: bool,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}
