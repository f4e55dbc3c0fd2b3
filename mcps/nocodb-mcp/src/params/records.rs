//! Record-level parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shapes;
use crate::nocodb::{ExportFormat, JsonObject};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TableDataParams {
    #[schemars(description = "The ID of the table to get data from")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "Number of records to return (default: 25)")]
    #[serde(default, deserialize_with = "crate::params::lenient::page")]
    pub limit: Option<u32>,

    #[schemars(description = "Number of records to skip (default: 0)")]
    #[serde(default, deserialize_with = "crate::params::lenient::page")]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateRecordParams {
    #[schemars(description = "The ID of the table to create a record in")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::record")]
    pub data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RecordIdParams {
    #[schemars(description = "The ID of the table containing the record")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "The ID of the record")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub record_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateRecordParams {
    #[schemars(description = "The ID of the table containing the record")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "The ID of the record to update")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub record_id: String,

    #[schemars(schema_with = "shapes::record")]
    pub data: JsonObject,
}

/// Used by both `bulk_insert_records` and `bulk_update_records`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkRecordsParams {
    #[schemars(description = "The ID of the table")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::records")]
    pub records: Vec<JsonObject>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkDeleteParams {
    #[schemars(description = "The ID of the table")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::record_ids")]
    pub record_ids: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportParams {
    #[schemars(description = "The ID of the table")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "Export format: csv, excel, or json")]
    #[serde(default)]
    pub export_type: ExportFormat,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CountParams {
    #[schemars(description = "The ID of the table")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "Optional NocoDB where expression, e.g. (Status,eq,Done)")]
    #[serde(default, rename = "where")]
    pub where_clause: Option<String>,
}
