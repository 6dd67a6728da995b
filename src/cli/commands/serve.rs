//! Serve command: MCP over stdio.

use crate::cli::preflight::{self, Operation};
use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;

/// Run the MCP server until stdin closes.
pub async fn run_serve(settings: Settings) -> Result<()> {
    // Stdout belongs to the protocol, so a missing yt-dlp is only logged.
    // Tool calls will report it per request.
    if let Err(e) = preflight::check(Operation::Search, &settings) {
        tracing::warn!("{}", e);
    }

    let server = McpServer::new(settings);
    server.run().await
}
