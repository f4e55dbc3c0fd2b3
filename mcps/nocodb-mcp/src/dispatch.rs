//! Tool dispatch
//!
//! Resolves a tool name against the [`Catalogue`], checks required
//! arguments, parses them into the tool's parameter type and performs the
//! matching [`NocoDbClient`] call. [`Dispatcher::invoke`] is the error
//! boundary: whatever happens, the caller gets a success envelope whose text
//! is either the indented JSON result or `Error: <message>`.

use std::sync::Arc;

use mcp_common::{error_text, json_text, text_success, CallToolResult};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::catalogue::{Catalogue, ToolCall};
use crate::nocodb::{JsonObject, NocoDbClient, NocoDbError, NocoDbResult, DEFAULT_PAGE_LIMIT};

/// Reasons a tool call did not produce a result
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Required arguments that were absent or empty
    #[error("{}", required_message(.0))]
    MissingArguments(Vec<String>),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Api(#[from] NocoDbError),
}

/// `a is required`, `a and b are required`, `a, b, and c are required`
fn required_message(fields: &[String]) -> String {
    match fields {
        [] => "required arguments are missing".to_string(),
        [only] => format!("{} is required", only),
        [first, second] => format!("{} and {} are required", first, second),
        [rest @ .., last] => format!("{}, and {} are required", rest.join(", "), last),
    }
}

/// Absent values and JSON "falsy" values all count as missing
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Routes tool invocations to the NocoDB client
#[derive(Clone)]
pub struct Dispatcher {
    catalogue: Arc<Catalogue>,
    client: NocoDbClient,
}

impl Dispatcher {
    pub fn new(client: NocoDbClient) -> Self {
        Self {
            catalogue: Arc::new(Catalogue::new()),
            client,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Check a call against the catalogue without touching the network
    pub fn validate(&self, name: &str, arguments: &JsonObject) -> Result<ToolCall, DispatchError> {
        let descriptor = self
            .catalogue
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let missing: Vec<String> = descriptor
            .required
            .iter()
            .filter(|field| arguments.get(field.as_str()).map_or(true, is_blank))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(DispatchError::MissingArguments(missing));
        }

        descriptor
            .kind
            .parse(arguments)
            .map_err(|source| DispatchError::InvalidArguments {
                tool: descriptor.kind.name(),
                source,
            })
    }

    /// Validate and execute a call, returning the decoded upstream result
    pub async fn dispatch(&self, name: &str, arguments: &JsonObject) -> Result<Value, DispatchError> {
        let call = self.validate(name, arguments)?;
        Ok(self.execute(call).await?)
    }

    /// Validate, execute and render a call as MCP content
    ///
    /// Never fails: errors are logged here and returned as `Error: ...` text.
    #[instrument(skip(self, arguments), fields(tool = %name))]
    pub async fn invoke(&self, name: &str, arguments: &JsonObject) -> CallToolResult {
        info!("tool call");

        let rendered = match self.dispatch(name, arguments).await {
            Ok(value) => json_text(&value).map_err(DispatchError::Serialize),
            Err(e) => Err(e),
        };

        match rendered {
            Ok(text) => text_success(text),
            Err(e) => {
                error!(error = %e, "tool call failed");
                error_text(e)
            }
        }
    }

    async fn execute(&self, call: ToolCall) -> NocoDbResult<Value> {
        let client = &self.client;

        match call {
            // Bases
            ToolCall::ListBases(_) => client.list_bases().await,
            ToolCall::GetBaseInfo(p) => client.get_base_info(&p.base_id).await,
            ToolCall::CreateBase(p) => {
                let description = p.description.as_deref().unwrap_or_default();
                client.create_base(&p.title, description).await
            }

            // Tables
            ToolCall::ListTables(p) => client.list_tables(&p.base_id).await,
            ToolCall::GetTableInfo(p) => client.get_table_info(&p.table_id).await,
            ToolCall::CreateTable(p) => {
                client
                    .create_table(&p.base_id, &p.title, &p.table_name, p.columns)
                    .await
            }
            ToolCall::DeleteTable(p) => client.delete_table(&p.table_id).await,
            ToolCall::DuplicateTable(p) => client.duplicate_table(&p.table_id, p.options).await,
            ToolCall::GetTableSchema(p) => client.get_table_schema(&p.table_id).await,

            // Columns
            ToolCall::CreateColumn(p) => client.create_column(&p.table_id, p.column_data).await,
            ToolCall::UpdateColumn(p) => {
                client
                    .update_column(&p.table_id, &p.column_id, p.column_data)
                    .await
            }
            ToolCall::DeleteColumn(p) => client.delete_column(&p.table_id, &p.column_id).await,

            // Views, filters, sorts
            ToolCall::CreateView(p) => client.create_view(&p.table_id, p.view_data).await,
            ToolCall::ListViews(p) => client.list_views(&p.table_id).await,
            ToolCall::DeleteView(p) => client.delete_view(&p.view_id).await,
            ToolCall::CreateFilter(p) => client.create_filter(&p.view_id, p.filter_data).await,
            ToolCall::ListFilters(p) => client.list_filters(&p.view_id).await,
            ToolCall::DeleteFilter(p) => client.delete_filter(&p.filter_id).await,
            ToolCall::CreateSort(p) => client.create_sort(&p.view_id, p.sort_data).await,
            ToolCall::ListSorts(p) => client.list_sorts(&p.view_id).await,
            ToolCall::DeleteSort(p) => client.delete_sort(&p.sort_id).await,

            // Webhooks
            ToolCall::CreateWebhook(p) => client.create_webhook(&p.table_id, p.webhook_data).await,
            ToolCall::ListWebhooks(p) => client.list_webhooks(&p.table_id).await,
            ToolCall::DeleteWebhook(p) => client.delete_webhook(&p.hook_id).await,
            ToolCall::TestWebhook(p) => client.test_webhook(&p.table_id, p.webhook_data).await,

            // Records
            ToolCall::GetTableData(p) => {
                let limit = p.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
                let offset = p.offset.unwrap_or(0);
                client.get_table_data(&p.table_id, limit, offset).await
            }
            ToolCall::CreateRecord(p) => client.create_record(&p.table_id, p.data).await,
            ToolCall::GetRecord(p) => client.get_record(&p.table_id, &p.record_id).await,
            ToolCall::UpdateRecord(p) => {
                client
                    .update_record(&p.table_id, &p.record_id, p.data)
                    .await
            }
            ToolCall::DeleteRecord(p) => client.delete_record(&p.table_id, &p.record_id).await,
            ToolCall::BulkInsertRecords(p) => client.bulk_insert_records(&p.table_id, p.records).await,
            ToolCall::BulkUpdateRecords(p) => client.bulk_update_records(&p.table_id, p.records).await,
            ToolCall::BulkDeleteRecords(p) => {
                client.bulk_delete_records(&p.table_id, p.record_ids).await
            }
            ToolCall::ExportTableData(p) => client.export_table_data(&p.table_id, p.export_type).await,
            ToolCall::GetTableCount(p) => {
                client
                    .get_table_count(&p.table_id, p.where_clause.as_deref())
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{ToolDescriptor, ToolKind};
    use crate::testing::RecordingTransport;
    use reqwest::Method;
    use serde_json::json;

    /// Resource segment each tool's endpoint must contain
    fn expected_segment(kind: ToolKind) -> &'static str {
        match kind {
            ToolKind::ListBases | ToolKind::CreateBase => "/meta/bases",
            ToolKind::GetBaseInfo => "/info",
            ToolKind::ListTables | ToolKind::CreateTable => "/tables",
            ToolKind::GetTableInfo | ToolKind::DeleteTable | ToolKind::GetTableSchema => "/meta/tables/",
            ToolKind::DuplicateTable => "/duplicate",
            ToolKind::CreateColumn => "/columns",
            ToolKind::UpdateColumn | ToolKind::DeleteColumn => "/columns/",
            ToolKind::CreateView => "/grids",
            ToolKind::ListViews => "/views",
            ToolKind::DeleteView => "/meta/views/",
            ToolKind::CreateFilter | ToolKind::ListFilters => "/filters",
            ToolKind::DeleteFilter => "/meta/filters/",
            ToolKind::CreateSort | ToolKind::ListSorts => "/sorts",
            ToolKind::DeleteSort => "/meta/sorts/",
            ToolKind::CreateWebhook | ToolKind::ListWebhooks => "/hooks",
            ToolKind::DeleteWebhook => "/meta/hooks/",
            ToolKind::TestWebhook => "/hooks/test",
            ToolKind::GetTableData => "/records?",
            ToolKind::CreateRecord
            | ToolKind::BulkInsertRecords
            | ToolKind::BulkUpdateRecords
            | ToolKind::BulkDeleteRecords => "/records",
            ToolKind::GetRecord | ToolKind::UpdateRecord | ToolKind::DeleteRecord => "/records/",
            ToolKind::ExportTableData => "/export/csv",
            ToolKind::GetTableCount => "/count",
        }
    }

    fn dispatcher(transport: Arc<RecordingTransport>) -> Dispatcher {
        Dispatcher::new(NocoDbClient::new(transport))
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("arguments must be an object, got {}", other),
        }
    }

    fn text_of(result: &CallToolResult) -> String {
        assert!(!result.is_error.unwrap_or(false), "errors travel as content");
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => t.text.clone(),
            _ => panic!("expected text content"),
        }
    }

    /// A plausible non-empty value for every required property
    fn required_arguments(descriptor: &ToolDescriptor) -> JsonObject {
        let properties = descriptor.tool.input_schema.get("properties").unwrap();
        descriptor
            .required
            .iter()
            .map(|field| {
                let schema = &properties[field.as_str()];
                let value = match schema["type"].as_str() {
                    Some("array") if schema["items"]["type"] == "string" => json!(["r1", "r2"]),
                    Some("array") => json!([{"Title": "row"}]),
                    Some("object") => json!({"title": "value"}),
                    _ => json!(format!("{}-1", field)),
                };
                (field.clone(), value)
            })
            .collect()
    }

    #[tokio::test]
    async fn every_tool_makes_exactly_one_request_to_its_resource() {
        let catalogue = Catalogue::new();
        for descriptor in catalogue.iter() {
            let transport = RecordingTransport::json(json!({"ok": true}));
            let dispatcher = dispatcher(transport.clone());

            let text = text_of(&dispatcher.invoke(descriptor.name(), &required_arguments(descriptor)).await);

            let requests = transport.requests();
            assert!(!text.starts_with("Error:"), "{}: {}", descriptor.name(), text);
            assert_eq!(requests.len(), 1, "{}", descriptor.name());
            let segment = expected_segment(descriptor.kind);
            assert!(
                requests[0].endpoint.contains(segment),
                "{} requested {} (expected {})",
                descriptor.name(),
                requests[0].endpoint,
                segment
            );
        }
    }

    #[tokio::test]
    async fn omitting_any_required_field_rejects_without_request() {
        let catalogue = Catalogue::new();
        for descriptor in catalogue.iter() {
            for field in &descriptor.required {
                for replacement in [None, Some(json!("")), Some(Value::Null)] {
                    let transport = RecordingTransport::json(json!({}));
                    let dispatcher = dispatcher(transport.clone());
                    let mut arguments = required_arguments(descriptor);
                    match replacement {
                        Some(value) => {
                            arguments.insert(field.clone(), value);
                        }
                        None => {
                            arguments.remove(field);
                        }
                    }

                    let text = text_of(&dispatcher.invoke(descriptor.name(), &arguments).await);

                    assert!(text.starts_with("Error: "), "{}: {}", descriptor.name(), text);
                    assert!(text.contains(field.as_str()), "{}", text);
                    assert!(transport.requests().is_empty(), "{}", descriptor.name());
                }
            }
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_verbatim() {
        let transport = RecordingTransport::json(json!({}));
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(&dispatcher.invoke("drop_everything", &JsonObject::new()).await);

        assert_eq!(text, "Error: Unknown tool: drop_everything");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_all_named() {
        let transport = RecordingTransport::json(json!({}));
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(&dispatcher.invoke("update_record", &JsonObject::new()).await);

        assert!(text.starts_with("Error: "));
        assert!(text.ends_with(" are required"), "{}", text);
        for field in ["table_id", "record_id", "data"] {
            assert!(text.contains(field), "{}", text);
        }
    }

    #[tokio::test]
    async fn empty_collections_count_as_missing() {
        let transport = RecordingTransport::json(json!({}));
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(
            &dispatcher
                .invoke("bulk_delete_records", &args(json!({"table_id": "t1", "record_ids": []})))
                .await,
        );

        assert_eq!(text, "Error: record_ids is required");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn create_view_with_unknown_type_never_hits_the_network() {
        let transport = RecordingTransport::json(json!({}));
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(
            &dispatcher
                .invoke(
                    "create_view",
                    &args(json!({"table_id": "t1", "view_data": {"type": "calendar"}})),
                )
                .await,
        );

        assert_eq!(text, "Error: Unsupported view type: calendar");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn list_tools_return_the_inner_list() {
        let transport = RecordingTransport::json(json!({
            "list": [{"id": "a"}],
            "pageInfo": {"totalRows": 1, "page": 1}
        }));
        let dispatcher = dispatcher(transport);

        let text = text_of(&dispatcher.invoke("list_tables", &args(json!({"base_id": "b1"}))).await);

        assert_eq!(text, "[\n  {\n    \"id\": \"a\"\n  }\n]");
    }

    #[tokio::test]
    async fn bare_array_listings_are_unchanged() {
        let transport = RecordingTransport::json(json!([{"id": "a"}]));
        let dispatcher = dispatcher(transport);

        let text = text_of(&dispatcher.invoke("list_bases", &JsonObject::new()).await);

        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), json!([{"id": "a"}]));
    }

    #[tokio::test]
    async fn table_data_defaults_to_first_page_of_25() {
        let transport = RecordingTransport::json(json!({"list": []}));
        let dispatcher = dispatcher(transport.clone());

        dispatcher
            .invoke("get_table_data", &args(json!({"table_id": "t1"})))
            .await;
        dispatcher
            .invoke(
                "get_table_data",
                &args(json!({"table_id": "t1", "limit": 10, "offset": 40})),
            )
            .await;

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].endpoint, "/tables/t1/records?limit=25&offset=0");
        assert_eq!(requests[1].endpoint, "/tables/t1/records?limit=10&offset=40");
    }

    #[tokio::test]
    async fn numeric_identifiers_are_forwarded_as_path_segments() {
        let transport = RecordingTransport::json(json!({"Id": 5}));
        let dispatcher = dispatcher(transport.clone());

        let fetched = text_of(
            &dispatcher
                .invoke("get_record", &args(json!({"table_id": "t1", "record_id": 5})))
                .await,
        );
        dispatcher
            .invoke(
                "update_record",
                &args(json!({"table_id": "t1", "record_id": 12, "data": {"Done": true}})),
            )
            .await;

        let requests = transport.requests();
        assert_eq!(fetched, "{\n  \"Id\": 5\n}");
        assert_eq!(requests[0].endpoint, "/tables/t1/records/5");
        assert_eq!(requests[1].method, Method::PATCH);
        assert_eq!(requests[1].endpoint, "/tables/t1/records/12");
    }

    #[tokio::test]
    async fn numeric_string_paging_is_accepted() {
        let transport = RecordingTransport::json(json!({"list": []}));
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(
            &dispatcher
                .invoke(
                    "get_table_data",
                    &args(json!({"table_id": "t1", "limit": "10", "offset": "20"})),
                )
                .await,
        );

        assert_eq!(text, "[]");
        assert_eq!(transport.requests()[0].endpoint, "/tables/t1/records?limit=10&offset=20");
    }

    #[tokio::test]
    async fn mistyped_arguments_are_rejected_before_the_network() {
        let transport = RecordingTransport::json(json!({}));
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(
            &dispatcher
                .invoke("get_table_data", &args(json!({"table_id": "t1", "limit": "ten"})))
                .await,
        );

        assert!(text.starts_with("Error: invalid arguments for get_table_data: "), "{}", text);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn bulk_delete_sends_ids_wrapper() {
        let transport = RecordingTransport::json(json!([{"Id": "r1"}, {"Id": "r2"}]));
        let dispatcher = dispatcher(transport.clone());

        dispatcher
            .invoke(
                "bulk_delete_records",
                &args(json!({"table_id": "t1", "record_ids": ["r1", "r2"]})),
            )
            .await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].body, Some(json!({"ids": ["r1", "r2"]})));
    }

    #[tokio::test]
    async fn payloads_are_forwarded_verbatim() {
        let transport = RecordingTransport::json(json!({}));
        let dispatcher = dispatcher(transport.clone());
        let column = json!({"column_name": "due", "uidt": "Date", "meta": {"date_format": "YYYY-MM-DD"}});

        dispatcher
            .invoke(
                "create_column",
                &args(json!({"table_id": "t1", "column_data": column.clone()})),
            )
            .await;
        dispatcher
            .invoke(
                "create_base",
                &args(json!({"title": "CRM"})),
            )
            .await;

        let requests = transport.requests();
        assert_eq!(requests[0].endpoint, "/meta/tables/t1/columns");
        assert_eq!(requests[0].body, Some(column));
        assert_eq!(requests[1].body, Some(json!({"title": "CRM", "description": ""})));
    }

    #[tokio::test]
    async fn transport_failures_become_error_text() {
        let transport = RecordingTransport::failing("connection refused");
        let dispatcher = dispatcher(transport.clone());

        let text = text_of(&dispatcher.invoke("get_table_schema", &args(json!({"table_id": "t1"}))).await);

        assert_eq!(text, "Error: Request failed: connection refused");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn repeated_reads_render_identically() {
        let transport = RecordingTransport::json(json!({
            "list": [{"id": "b1", "title": "Ops", "meta": {"color": "red", "icon": null}}]
        }));
        let dispatcher = dispatcher(transport);
        let schema_args = args(json!({"table_id": "t1"}));

        let first = text_of(&dispatcher.invoke("list_bases", &JsonObject::new()).await);
        let second = text_of(&dispatcher.invoke("list_bases", &JsonObject::new()).await);
        let schema_first = text_of(&dispatcher.invoke("get_table_schema", &schema_args).await);
        let schema_second = text_of(&dispatcher.invoke("get_table_schema", &schema_args).await);

        assert_eq!(first, second);
        assert_eq!(schema_first, schema_second);
    }

    #[test]
    fn required_message_reads_naturally() {
        let fields = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(required_message(&fields(&["table_id"])), "table_id is required");
        assert_eq!(
            required_message(&fields(&["table_id", "data"])),
            "table_id and data are required"
        );
        assert_eq!(
            required_message(&fields(&["table_id", "record_id", "data"])),
            "table_id, record_id, and data are required"
        );
    }

    #[test]
    fn falsy_values_are_blank() {
        for blank in [json!(null), json!(""), json!([]), json!({}), json!(false), json!(0)] {
            assert!(is_blank(&blank), "{}", blank);
        }
        for present in [json!("x"), json!([1]), json!({"a": 1}), json!(true), json!(7)] {
            assert!(!is_blank(&present), "{}", present);
        }
    }
}
