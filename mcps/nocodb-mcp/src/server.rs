//! MCP server for NocoDB
//!
//! Tool definitions come from the static [`Catalogue`] rather than the
//! `#[tool_router]` macros, so `tools/list` and `tools/call` are implemented
//! by hand and both delegate to the [`Dispatcher`].

use std::sync::Arc;

use mcp_common::{async_trait, EmbeddableMcp, McpError};
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use serde_json::Value;

use crate::catalogue::Catalogue;
use crate::dispatch::Dispatcher;
use crate::nocodb::{JsonObject, NocoDbClient};

const INSTRUCTIONS: &str = "NocoDB MCP Server - manage NocoDB bases, tables, columns, views, \
     filters, sorts, webhooks and records. Failures are returned as text starting with \
     'Error: '.";

/// The NocoDB MCP server
#[derive(Clone)]
pub struct NocoDbMcpServer {
    dispatcher: Arc<Dispatcher>,
}

impl NocoDbMcpServer {
    pub fn new(client: NocoDbClient) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(client)),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.dispatcher.catalogue()
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl ServerHandler for NocoDbMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.catalogue().tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.dispatcher.invoke(&request.name, &arguments).await)
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for NocoDbMcpServer {
    fn server_name(&self) -> &str {
        "nocodb"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.catalogue().tools()
    }

    async fn call_tool(&self, name: &str, params: Value) -> CallToolResult {
        let arguments = match params {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        };
        self.dispatcher.invoke(name, &arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn server(transport: Arc<RecordingTransport>) -> NocoDbMcpServer {
        NocoDbMcpServer::new(NocoDbClient::new(transport))
    }

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(t) => &t.text,
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn info_advertises_tools() {
        let info = server(RecordingTransport::json(json!({}))).get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("NocoDB"));
    }

    #[test]
    fn embedded_listing_matches_catalogue() {
        let server = server(RecordingTransport::json(json!({})));

        let tools = EmbeddableMcp::list_tools(&server);

        assert_eq!(server.server_name(), "nocodb");
        assert_eq!(tools.len(), server.catalogue().len());
        assert!(tools.iter().any(|t| t.name == "bulk_delete_records"));
    }

    #[tokio::test]
    async fn embedded_call_reaches_nocodb() {
        let transport = RecordingTransport::json(json!({"list": [{"id": "p1", "title": "CRM"}]}));
        let server = server(transport.clone());

        let result = EmbeddableMcp::call_tool(&server, "list_bases", json!({})).await;

        assert!(!result.is_error.unwrap_or(false));
        assert!(text(&result).contains("\"CRM\""));
        assert_eq!(transport.requests()[0].endpoint, "/meta/bases");
    }

    #[tokio::test]
    async fn non_object_params_count_as_empty() {
        let transport = RecordingTransport::json(json!({}));
        let server = server(transport.clone());

        let result = EmbeddableMcp::call_tool(&server, "get_base_info", json!("b1")).await;

        assert_eq!(text(&result), "Error: base_id is required");
        assert!(transport.requests().is_empty());
    }
}
