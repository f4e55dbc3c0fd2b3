//! Declared shapes of pass-through payloads
//!
//! Used through `#[schemars(schema_with = ...)]`; none of this is enforced
//! locally beyond the required-field check, NocoDB validates the payloads.

use schemars::{json_schema, Schema, SchemaGenerator};

pub const VIEW_TYPES: [&str; 4] = ["grid", "form", "gallery", "kanban"];
pub const SORT_DIRECTIONS: [&str; 2] = ["asc", "desc"];
pub const NOTIFICATION_TYPES: [&str; 5] = ["URL", "Email", "Slack", "Discord", "Teams"];
pub const HOOK_EVENTS: [&str; 2] = ["after", "before"];
pub const HOOK_OPERATIONS: [&str; 3] = ["insert", "update", "delete"];

pub fn column_definitions(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "array",
        "description": "Array of column definitions",
        "items": {
            "type": "object",
            "properties": {
                "column_name": { "type": "string" },
                "title": { "type": "string" },
                "uidt": { "type": "string", "description": "Column type (SingleLineText, LongText, Number, etc.)" },
                "dt": { "type": "string", "description": "Database type" },
                "np": { "type": "string", "description": "Numeric precision" },
                "ns": { "type": "string", "description": "Numeric scale" }
            }
        }
    })
}

pub fn column_data(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Column definition including name, type, and properties",
        "properties": {
            "column_name": { "type": "string" },
            "title": { "type": "string" },
            "uidt": { "type": "string", "description": "Column type (SingleLineText, LongText, Number, etc.)" },
            "dt": { "type": "string", "description": "Database type" },
            "rqd": { "type": "boolean", "description": "Required field" }
        }
    })
}

pub fn column_update(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Updated column properties"
    })
}

pub fn view_data(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "View configuration",
        "properties": {
            "title": { "type": "string", "description": "View title" },
            "type": { "type": "string", "enum": VIEW_TYPES, "description": "View type (default: grid)" }
        }
    })
}

pub fn filter_data(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Filter configuration",
        "properties": {
            "fk_column_id": { "type": "string", "description": "Column ID to filter on" },
            "comparison_op": { "type": "string", "description": "Comparison operator (eq, neq, like, etc.)" },
            "value": { "type": "string", "description": "Filter value" }
        }
    })
}

pub fn sort_data(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Sort configuration",
        "properties": {
            "fk_column_id": { "type": "string", "description": "Column ID to sort by" },
            "direction": { "type": "string", "enum": SORT_DIRECTIONS, "description": "Sort direction" }
        }
    })
}

pub fn webhook_data(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Webhook configuration",
        "properties": {
            "title": { "type": "string", "description": "Webhook title" },
            "notification": {
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": NOTIFICATION_TYPES },
                    "payload": { "type": "object" }
                }
            },
            "event": { "type": "string", "enum": HOOK_EVENTS, "description": "When to trigger" },
            "operation": { "type": "string", "enum": HOOK_OPERATIONS, "description": "Which operation to watch" }
        }
    })
}

pub fn duplicate_options(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Duplication options",
        "properties": {
            "includeData": { "type": "boolean", "description": "Include table data" },
            "excludeHooks": { "type": "boolean", "description": "Exclude webhooks" },
            "excludeViews": { "type": "boolean", "description": "Exclude views" }
        }
    })
}

pub fn record(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "description": "Record fields as key-value pairs"
    })
}

pub fn records(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "array",
        "description": "Array of record objects (updates must include record IDs)",
        "items": { "type": "object" }
    })
}

pub fn record_ids(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "array",
        "description": "Array of record IDs to delete",
        "items": { "type": "string" }
    })
}
