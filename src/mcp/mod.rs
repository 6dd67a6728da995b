//! MCP (Model Context Protocol) server.
//!
//! Exposes `search_videos` and `get_transcript` to AI assistants.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
