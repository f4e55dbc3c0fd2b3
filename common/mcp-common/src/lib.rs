//! MCP Common - Shared utilities for MCP servers
//!
//! This crate provides common functionality used by the MCP servers in this
//! workspace:
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`] for standardized startup
//! - **Results**: Helpers for building `CallToolResult` responses, including the
//!   errors-as-content convention (`Error: <message>` inside a success envelope)
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{error_text, json_text, text_success};
//!
//! fn render(value: &serde_json::Value) -> CallToolResult {
//!     match json_text(value) {
//!         Ok(text) => text_success(text),
//!         Err(e) => error_text(e),
//!     }
//! }
//! ```

pub mod embeddable;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::EmbeddableMcp;
pub use init::{init_tracing, serve_stdio};
pub use result::{error_text, json_text, text_success, ERROR_PREFIX};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
