//! MCP server that reads JSON-RPC 2.0 messages line by line and writes one
//! response line per request.
//!
//! `run` serves stdin/stdout; `serve` accepts any async reader and writer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::desk::LeaveDesk;
use crate::display::HELP_TEXT;
use crate::errors::Result;

use super::tools::{get_tool_definitions, handle_tool_call};
use super::transport::{ErrorCode, JsonRpcRequest, JsonRpcResponse};

/// URI of the assistant help resource.
pub const HELP_RESOURCE_URI: &str = "leavedesk://help";

/// Runtime statistics for the MCP server.
pub struct ServerStats {
    started_at: Instant,
    total_requests: AtomicU64,
    tool_calls: AtomicU64,
    errors: AtomicU64,
}

impl ServerStats {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            total_requests: AtomicU64::new(0),
            tool_calls: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }
}

/// The MCP server wrapping a `LeaveDesk`.
pub struct McpServer {
    desk: LeaveDesk,
    stats: ServerStats,
    tool_call_counts: Mutex<HashMap<String, u64>>,
}

impl McpServer {
    pub fn new(desk: LeaveDesk) -> Self {
        Self {
            desk,
            stats: ServerStats::new(),
            tool_call_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Serves stdin/stdout until stdin is closed.
    pub async fn run(&self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serves requests from `reader` until end of input, writing responses
    /// to `writer`. Requests are handled one at a time, in order.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("leavedesk MCP server started");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line) else {
                continue;
            };

            let json_line = match serde_json::to_string(&response) {
                Ok(s) => s,
                Err(e) => {
                    error!("failed to serialize response: {}", e);
                    continue;
                }
            };
            writer.write_all(format!("{}\n", json_line).as_bytes()).await?;
            writer.flush().await?;
        }

        info!(
            requests = self.stats.total_requests.load(Ordering::Relaxed),
            "leavedesk MCP server stopped"
        );
        Ok(())
    }

    /// Handles one raw input line. Returns `None` for blank lines and
    /// notifications.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(self.reject(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("failed to parse JSON-RPC request: {}", e),
                ))
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(&request),
            Err(e) => Some(self.reject(
                id,
                ErrorCode::InvalidRequest,
                format!("not a JSON-RPC request: {}", e),
            )),
        }
    }

    fn reject(&self, id: Value, code: ErrorCode, message: String) -> JsonRpcResponse {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);
        self.stats.errors.fetch_add(1, Ordering::Relaxed);
        warn!("rejected malformed request: {}", message);
        JsonRpcResponse::error(id, code, message)
    }

    /// Dispatches a parsed JSON-RPC request to the appropriate handler.
    ///
    /// Notifications are handled but never answered.
    pub fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);
        let id = request.id.clone();

        let result = match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id)),
            "initialized" | "notifications/initialized" => None,
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Some(self.handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(id, &request.params)),
            "resources/list" => Some(self.handle_resources_list(id)),
            "resources/read" => Some(self.handle_resources_read(id, &request.params)),
            _ => Some(JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("method not found: {}", request.method),
            )),
        };

        if result.as_ref().is_some_and(JsonRpcResponse::is_error) {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
        }

        if request.is_notification() {
            return None;
        }
        result
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": "leavedesk",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = get_tool_definitions();
        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, id: Value, params: &Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing params for tools/call".to_string(),
            );
        };

        let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing 'name' in tools/call params".to_string(),
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        self.stats.tool_calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut counts) = self.tool_call_counts.lock() {
            *counts.entry(tool_name.to_string()).or_insert(0) += 1;
        }

        let server_stats = if tool_name == "desk_status" {
            Some(self.server_stats_json())
        } else {
            None
        };

        match handle_tool_call(&self.desk, tool_name, arguments, server_stats) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(tool = tool_name, "tool call failed: {}", e);
                JsonRpcResponse::from_tool_error(id, &e)
            }
        }
    }

    fn handle_resources_list(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "resources": [{
                    "uri": HELP_RESOURCE_URI,
                    "name": "Leave desk assistant help",
                    "description": "Example requests and tips for finding employees",
                    "mimeType": "text/markdown"
                }]
            }),
        )
    }

    /// Serves the help resource. Any URI under `leavedesk://help` resolves to
    /// the same text.
    fn handle_resources_read(&self, id: Value, params: &Option<Value>) -> JsonRpcResponse {
        let Some(uri) = params
            .as_ref()
            .and_then(|p| p.get("uri"))
            .and_then(|v| v.as_str())
        else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing 'uri' in resources/read params".to_string(),
            );
        };

        if !uri.starts_with(HELP_RESOURCE_URI) {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                format!("unknown resource: {}", uri),
            );
        }

        JsonRpcResponse::success(
            id,
            json!({
                "contents": [{
                    "uri": uri,
                    "mimeType": "text/markdown",
                    "text": HELP_TEXT
                }]
            }),
        )
    }

    /// Returns the current server runtime statistics as a JSON value.
    pub fn server_stats_json(&self) -> Value {
        let uptime = self.stats.started_at.elapsed();
        let tool_counts: Value = self
            .tool_call_counts
            .lock()
            .map(|counts| json!(*counts))
            .unwrap_or(json!({}));

        json!({
            "uptime_secs": uptime.as_secs(),
            "total_requests": self.stats.total_requests.load(Ordering::Relaxed),
            "tool_calls": self.stats.tool_calls.load(Ordering::Relaxed),
            "errors": self.stats.errors.load(Ordering::Relaxed),
            "tool_call_counts": tool_counts,
        })
    }
}
