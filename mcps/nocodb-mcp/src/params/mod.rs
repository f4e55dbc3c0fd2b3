//! Parameter types for NocoDB MCP tools
//!
//! Identifiers are typed fields; payloads NocoDB interprets itself (column,
//! view, filter, sort and webhook definitions, record data) stay JSON objects
//! and are forwarded untouched. Their expected shape is declared in [`shapes`]
//! so it shows up in each tool's input schema.

mod lenient;
mod meta;
mod records;
pub mod shapes;

pub use meta::*;
pub use records::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Empty parameters for tools that take no arguments
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EmptyParams {}

/// Parameters for tools addressing a single table
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TableIdParams {
    #[schemars(description = "The ID of the table")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,
}
