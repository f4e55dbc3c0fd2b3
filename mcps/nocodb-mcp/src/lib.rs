//! NocoDB MCP Library
//!
//! Exposes a NocoDB instance, reached through a Cloudflare Access gateway, as
//! a fixed catalogue of MCP tools: bases, tables, columns, views, filters,
//! sorts, webhooks and records.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use nocodb_mcp::{Config, NocoDbClient, NocoDbMcpServer};
//!
//! let connection = Config::load(None)?.connection()?;
//! let server = NocoDbMcpServer::new(NocoDbClient::connect(&connection)?);
//! mcp_common::serve_stdio(server).await?;
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `nocodb-mcp`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "nocodb": { "command": "./nocodb-mcp" } } }
//! ```

pub mod catalogue;
pub mod config;
pub mod dispatch;
pub mod nocodb;
pub mod params;
pub mod server;

#[cfg(test)]
mod testing;

pub use catalogue::{Catalogue, ToolKind};
pub use config::{Config, ConnectionConfig};
pub use dispatch::{DispatchError, Dispatcher};
pub use nocodb::{NocoDbClient, NocoDbError};
pub use server::NocoDbMcpServer;

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::EmbeddableMcp;
