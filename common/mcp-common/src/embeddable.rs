//! Embeddable MCP trait for in-process execution
//!
//! This module provides the [`EmbeddableMcp`] trait that allows MCP servers
//! to be executed directly in-process without subprocess spawning or IPC.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use nocodb_mcp::NocoDbMcpServer;
//!
//! let server = NocoDbMcpServer::new(client);
//!
//! // List available tools
//! let tools = server.list_tools();
//! println!("Available: {:?}", tools.iter().map(|t| &t.name).collect::<Vec<_>>());
//!
//! // Call a tool directly
//! let result = server.call_tool("list_bases", serde_json::json!({})).await;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Trait for MCP servers that can be executed in-process
///
/// Mirrors the two inbound MCP operations: introspection (`list_tools`)
/// and invocation (`call_tool`).
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent tool calls
/// from multiple async tasks.
///
/// # Errors as content
///
/// `call_tool` never fails. Unknown tools, invalid parameters and failed
/// operations all come back as a success envelope whose text starts with
/// [`crate::ERROR_PREFIX`], exactly as a remote MCP client would see them.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Returns the server name for identification
    ///
    /// This should match the server name used in MCP configuration files.
    fn server_name(&self) -> &str;

    /// Returns a list of all available tools
    ///
    /// Each tool includes its name, description, and input schema.
    fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name with the given parameters
    ///
    /// `params` should be a JSON object; anything else is treated as an
    /// empty argument map.
    async fn call_tool(&self, name: &str, params: Value) -> CallToolResult;

    /// Returns an optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }

    /// Returns the server version, if available
    fn server_version(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error_text, text_success};

    // Minimal test implementation
    struct TestServer;

    #[async_trait]
    impl EmbeddableMcp for TestServer {
        fn server_name(&self) -> &str {
            "test-server"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, _params: Value) -> CallToolResult {
            match name {
                "ping" => text_success("pong"),
                _ => error_text(format!("Unknown tool: {}", name)),
            }
        }
    }

    #[test]
    fn test_server_name() {
        let server = TestServer;
        assert_eq!(server.server_name(), "test-server");
        assert!(server.server_description().is_none());
    }

    #[test]
    fn test_list_tools_empty() {
        let server = TestServer;
        assert!(server.list_tools().is_empty());
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_content() {
        let server = TestServer;
        let result = server.call_tool("unknown", serde_json::json!({})).await;
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }
}
