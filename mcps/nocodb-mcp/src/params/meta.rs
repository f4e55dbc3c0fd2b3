//! Metadata parameter types: bases, tables, columns, views, filters, sorts, webhooks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::shapes;
use crate::nocodb::JsonObject;

// ============================================================================
// Bases
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BaseIdParams {
    #[schemars(description = "The ID of the base")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub base_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateBaseParams {
    #[schemars(description = "The title of the new base")]
    pub title: String,

    #[schemars(description = "Optional description for the base")]
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTableParams {
    #[schemars(description = "The ID of the base to create the table in")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub base_id: String,

    #[schemars(description = "The display title of the table")]
    pub title: String,

    #[schemars(description = "The internal name of the table")]
    pub table_name: String,

    #[schemars(schema_with = "shapes::column_definitions")]
    pub columns: Vec<JsonObject>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DuplicateTableParams {
    #[schemars(description = "The ID of the table to duplicate")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::duplicate_options")]
    pub options: JsonObject,
}

// ============================================================================
// Columns
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateColumnParams {
    #[schemars(description = "The ID of the table to add the column to")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::column_data")]
    pub column_data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateColumnParams {
    #[schemars(description = "The ID of the table containing the column")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "The ID of the column to update")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub column_id: String,

    #[schemars(schema_with = "shapes::column_update")]
    pub column_data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ColumnIdParams {
    #[schemars(description = "The ID of the table containing the column")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(description = "The ID of the column")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub column_id: String,
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateViewParams {
    #[schemars(description = "The ID of the table to create the view for")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::view_data")]
    pub view_data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ViewIdParams {
    #[schemars(description = "The ID of the view")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub view_id: String,
}

// ============================================================================
// Filters & sorts
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateFilterParams {
    #[schemars(description = "The ID of the view to create the filter for")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub view_id: String,

    #[schemars(schema_with = "shapes::filter_data")]
    pub filter_data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FilterIdParams {
    #[schemars(description = "The ID of the filter to delete")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub filter_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateSortParams {
    #[schemars(description = "The ID of the view to create the sort for")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub view_id: String,

    #[schemars(schema_with = "shapes::sort_data")]
    pub sort_data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SortIdParams {
    #[schemars(description = "The ID of the sort to delete")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub sort_id: String,
}

// ============================================================================
// Webhooks
// ============================================================================

/// Used by both `create_webhook` and `test_webhook`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WebhookParams {
    #[schemars(description = "The ID of the table the webhook belongs to")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub table_id: String,

    #[schemars(schema_with = "shapes::webhook_data")]
    pub webhook_data: JsonObject,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HookIdParams {
    #[schemars(description = "The ID of the webhook to delete")]
    #[serde(deserialize_with = "crate::params::lenient::id")]
    pub hook_id: String,
}
