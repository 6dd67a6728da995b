//! MCP server implementation.

use super::protocol::*;
use super::tools::{get_tools, GET_TRANSCRIPT, SEARCH_VIDEOS};
use crate::config::Settings;
use crate::handlers::{SearchArgs, ToolHandlers, TranscriptArgs};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "yt-transcriber";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

type HandlerFactory = Box<dyn Fn(&Settings) -> crate::Result<ToolHandlers> + Send + Sync>;

/// MCP server for YouTube search and transcripts.
///
/// Owns the stdio loop. Every tool call gets freshly built handlers, so no
/// state carries over between calls.
pub struct McpServer {
    settings: Settings,
    make_handlers: HandlerFactory,
}

impl McpServer {
    /// Create a server backed by yt-dlp.
    pub fn new(settings: Settings) -> Self {
        Self::with_factory(settings, ToolHandlers::from_settings)
    }

    /// Create a server with a custom handler factory.
    pub fn with_factory<F>(settings: Settings, factory: F) -> Self
    where
        F: Fn(&Settings) -> crate::Result<ToolHandlers> + Send + Sync + 'static,
    {
        Self {
            settings,
            make_handlers: Box::new(factory),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        // Logging goes to stderr so it doesn't interfere with JSON-RPC
        info!("{} MCP server starting (v{})", SERVER_NAME, SERVER_VERSION);

        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            stdout.write_all(payload.as_bytes()).await?;
            stdout.flush().await?;
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one line of input. Returns `None` when nothing should be written.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Notifications never get a response
        let Some(id) = request.id else {
            debug!("Notification: {}", request.method);
            return None;
        };
        let id = Some(id);

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok());
        if let Some(client) = params.as_ref().and_then(|p| p.client_info.as_ref()) {
            info!(
                "Client connected: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult { tools: get_tools() };
        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        let handlers = match (self.make_handlers)(&self.settings) {
            Ok(handlers) => handlers,
            Err(e) => {
                error!("Failed to set up tool handlers: {}", e);
                let result = ToolCallResult::error(format!("Failed to set up tools: {}", e));
                return JsonRpcResponse::from_serializable(id, &result);
            }
        };

        let result = match params.name.as_str() {
            SEARCH_VIDEOS => tool_search_videos(&handlers, arguments).await,
            GET_TRANSCRIPT => tool_get_transcript(&handlers, arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        JsonRpcResponse::from_serializable(id, &result)
    }
}

/// search_videos tool.
async fn tool_search_videos(handlers: &ToolHandlers, arguments: Value) -> ToolCallResult {
    let args: SearchArgs = match serde_json::from_value(arguments) {
        Ok(args) => args,
        Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
    };

    match handlers.search_videos(args).await {
        Ok(response) => ToolCallResult::json(&response),
        Err(e) => ToolCallResult::error(e.to_string()),
    }
}

/// get_transcript tool.
async fn tool_get_transcript(handlers: &ToolHandlers, arguments: Value) -> ToolCallResult {
    let args: TranscriptArgs = match serde_json::from_value(arguments) {
        Ok(args) => args,
        Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
    };

    ToolCallResult::json(&handlers.get_transcript(args).await)
}
