//! Static tool catalogue
//!
//! One table lists every tool: its operation identifier, wire name, typed
//! parameters and description. [`ToolKind`] (names, descriptions, schemas)
//! and [`ToolCall`] (typed invocations) are both generated from it, so a tool
//! cannot be added without a parameter type, and the dispatcher's exhaustive
//! `match` on [`ToolCall`] refuses to compile until it has a handler.

use std::sync::Arc;

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde_json::{json, Value};

use crate::nocodb::JsonObject;
use crate::params::*;

macro_rules! tool_catalogue {
    ($( $variant:ident($params:ty) => $name:literal, $description:literal; )+) => {
        /// Identifier of every tool the server offers
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ToolKind {
            $($variant),+
        }

        /// An invocation whose arguments parsed into the tool's parameter type
        #[derive(Debug)]
        pub enum ToolCall {
            $($variant($params)),+
        }

        impl ToolKind {
            pub const ALL: &'static [ToolKind] = &[$(ToolKind::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(ToolKind::$variant => $name),+
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $(ToolKind::$variant => $description),+
                }
            }

            fn input_schema(self) -> JsonObject {
                match self {
                    $(ToolKind::$variant => schema_object::<$params>()),+
                }
            }

            /// Deserialize an argument map into this tool's parameters
            pub fn parse(self, arguments: &JsonObject) -> serde_json::Result<ToolCall> {
                let value = Value::Object(arguments.clone());
                match self {
                    $(ToolKind::$variant => serde_json::from_value(value).map(ToolCall::$variant)),+
                }
            }
        }
    };
}

tool_catalogue! {
    // Bases
    ListBases(EmptyParams) => "list_bases",
        "List all bases (projects) in NocoDB";
    GetBaseInfo(BaseIdParams) => "get_base_info",
        "Get detailed information about a specific base";
    CreateBase(CreateBaseParams) => "create_base",
        "Create a new base (project) in NocoDB";

    // Tables
    ListTables(BaseIdParams) => "list_tables",
        "List all tables in a base";
    GetTableInfo(TableIdParams) => "get_table_info",
        "Get detailed information about a table including columns and schema";
    CreateTable(CreateTableParams) => "create_table",
        "Create a new table in a base with specified columns";
    DeleteTable(TableIdParams) => "delete_table",
        "Delete a table from a base";
    DuplicateTable(DuplicateTableParams) => "duplicate_table",
        "Duplicate a table within the same base, optionally with data, views and webhooks";
    GetTableSchema(TableIdParams) => "get_table_schema",
        "Get complete schema information for a table including columns, relations, etc.";

    // Columns
    CreateColumn(CreateColumnParams) => "create_column",
        "Create a new column in an existing table";
    UpdateColumn(UpdateColumnParams) => "update_column",
        "Update an existing column in a table";
    DeleteColumn(ColumnIdParams) => "delete_column",
        "Delete a column from a table";

    // Views
    CreateView(CreateViewParams) => "create_view",
        "Create a new view for a table (grid, form, gallery, kanban)";
    ListViews(TableIdParams) => "list_views",
        "List all views for a table";
    DeleteView(ViewIdParams) => "delete_view",
        "Delete a view";

    // Filters
    CreateFilter(CreateFilterParams) => "create_filter",
        "Create a filter for a view";
    ListFilters(ViewIdParams) => "list_filters",
        "List all filters for a view";
    DeleteFilter(FilterIdParams) => "delete_filter",
        "Delete a filter";

    // Sorts
    CreateSort(CreateSortParams) => "create_sort",
        "Create a sort for a view";
    ListSorts(ViewIdParams) => "list_sorts",
        "List all sorts for a view";
    DeleteSort(SortIdParams) => "delete_sort",
        "Delete a sort";

    // Webhooks
    CreateWebhook(WebhookParams) => "create_webhook",
        "Create a webhook for table events";
    ListWebhooks(TableIdParams) => "list_webhooks",
        "List all webhooks for a table";
    DeleteWebhook(HookIdParams) => "delete_webhook",
        "Delete a webhook";
    TestWebhook(WebhookParams) => "test_webhook",
        "Test a webhook configuration";

    // Records
    GetTableData(TableDataParams) => "get_table_data",
        "Get data from a table with pagination";
    CreateRecord(CreateRecordParams) => "create_record",
        "Create a new record in a table";
    GetRecord(RecordIdParams) => "get_record",
        "Get a specific record from a table";
    UpdateRecord(UpdateRecordParams) => "update_record",
        "Update an existing record in a table";
    DeleteRecord(RecordIdParams) => "delete_record",
        "Delete a record from a table";
    BulkInsertRecords(BulkRecordsParams) => "bulk_insert_records",
        "Bulk insert multiple records into a table";
    BulkUpdateRecords(BulkRecordsParams) => "bulk_update_records",
        "Bulk update multiple records in a table";
    BulkDeleteRecords(BulkDeleteParams) => "bulk_delete_records",
        "Bulk delete multiple records from a table";
    ExportTableData(ExportParams) => "export_table_data",
        "Export table data in various formats (csv, excel, json)";
    GetTableCount(CountParams) => "get_table_count",
        "Get the count of records in a table with optional filtering";
}

impl ToolKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// JSON Schema of a parameter type, reduced to what MCP clients expect
fn schema_object<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    let mut object = match serde_json::to_value(&schema) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    };

    object.remove("$schema");
    object.remove("title");
    object.remove("description");
    object.entry("type").or_insert_with(|| json!("object"));
    object
        .entry("properties")
        .or_insert_with(|| Value::Object(JsonObject::new()));
    object
}

/// One catalogue entry, ready for introspection and validation
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub tool: Tool,
    /// Properties listed as required by the input schema
    pub required: Vec<String>,
}

impl ToolDescriptor {
    fn new(kind: ToolKind) -> Self {
        let schema = kind.input_schema();
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            kind,
            tool: Tool::new(kind.name(), kind.description(), Arc::new(schema)),
            required,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// The full set of tool descriptors, built once at startup
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<ToolDescriptor>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self {
            entries: ToolKind::ALL.iter().copied().map(ToolDescriptor::new).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter()
    }

    /// Tool definitions as advertised through `tools/list`
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|entry| entry.tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new()
    }
}
