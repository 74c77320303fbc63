//! MCP (Model Context Protocol) server for the leave desk.
//!
//! Provides a JSON-RPC 2.0 interface over stdio so that AI assistants can
//! look up employees, check leave balances and submit leave applications.

/// MCP server implementation.
pub mod server;

/// Tool definitions and dispatch.
pub mod tools;

/// JSON-RPC 2.0 transport types.
pub mod transport;

pub use server::{McpServer, HELP_RESOURCE_URI};
pub use tools::{get_tool_definitions, handle_tool_call, ToolDefinition};
pub use transport::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
