//! NocoDB API v2 client
//!
//! [`Transport`] performs one authenticated HTTP round trip; [`NocoDbClient`]
//! builds endpoints and bodies for each logical operation on top of it.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ExportFormat, NocoDbClient, ViewType, DEFAULT_PAGE_LIMIT};
pub use error::{NocoDbError, NocoDbResult};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// A JSON object passed through to NocoDB as a request body
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
