//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC types, tool definitions and the wellness tool handler.

pub mod handler;
pub mod protocol;
pub mod tools;

pub use handler::WellnessHandler;
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
};
pub use tools::{get_tool_definitions, TOOL_DEFINITIONS};
