//! Logical NocoDB operations
//!
//! Each method fixes the HTTP method, builds the endpoint from its
//! identifiers and performs exactly one round trip through the injected
//! [`Transport`]. Responses are decoded as JSON here, once, for every caller.

use std::str::FromStr;
use std::sync::Arc;

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::error::{NocoDbError, NocoDbResult};
use super::transport::{ApiRequest, HttpTransport, Transport};
use super::JsonObject;
use crate::config::ConnectionConfig;

/// Page size used by `get_table_data` when the caller gives none
pub const DEFAULT_PAGE_LIMIT: u32 = 25;

/// Kinds of view NocoDB can create, each behind its own endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Grid,
    Form,
    Gallery,
    Kanban,
}

impl ViewType {
    pub(crate) const ALL: [ViewType; 4] = [
        ViewType::Grid,
        ViewType::Form,
        ViewType::Gallery,
        ViewType::Kanban,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewType::Grid => "grid",
            ViewType::Form => "form",
            ViewType::Gallery => "gallery",
            ViewType::Kanban => "kanban",
        }
    }

    /// Collection segment under `/meta/tables/{id}/`
    pub fn collection(self) -> &'static str {
        match self {
            ViewType::Grid => "grids",
            ViewType::Form => "forms",
            ViewType::Gallery => "galleries",
            ViewType::Kanban => "kanbans",
        }
    }

    /// Resolve the `type` field of a view definition; absent means grid
    fn of(view: &JsonObject) -> NocoDbResult<Self> {
        match view.get("type") {
            None | Some(Value::Null) => Ok(ViewType::Grid),
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(NocoDbError::UnsupportedViewType(other.to_string())),
        }
    }
}

impl FromStr for ViewType {
    type Err = NocoDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NocoDbError::UnsupportedViewType(s.to_string()))
    }
}

/// File format of exported table data: csv (default), excel or json
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Json => "json",
        }
    }
}

/// Client for one NocoDB instance
#[derive(Clone)]
pub struct NocoDbClient {
    transport: Arc<dyn Transport>,
}

impl NocoDbClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build a client talking HTTP to the configured host
    pub fn connect(config: &ConnectionConfig) -> NocoDbResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Perform one request and decode the body as JSON
    ///
    /// An empty body decodes to an empty object.
    pub async fn request(
        &self,
        method: Method,
        endpoint: impl Into<String>,
        body: Option<Value>,
    ) -> NocoDbResult<Value> {
        let response = self.send(method, endpoint.into(), body).await?;
        decode_json(&response)
    }

    async fn send(
        &self,
        method: Method,
        endpoint: String,
        body: Option<Value>,
    ) -> NocoDbResult<Vec<u8>> {
        let mut request = ApiRequest::new(method, endpoint);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        let response = self.transport.send(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "response body received");
        Ok(response.body)
    }

    async fn get(&self, endpoint: String) -> NocoDbResult<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    async fn get_list(&self, endpoint: String) -> NocoDbResult<Value> {
        self.get(endpoint).await.map(unwrap_list)
    }

    async fn delete(&self, endpoint: String) -> NocoDbResult<Value> {
        self.request(Method::DELETE, endpoint, None).await
    }

    async fn post(&self, endpoint: String, body: Value) -> NocoDbResult<Value> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    async fn patch(&self, endpoint: String, body: Value) -> NocoDbResult<Value> {
        self.request(Method::PATCH, endpoint, Some(body)).await
    }

    // ------------------------------------------------------------------
    // Bases
    // ------------------------------------------------------------------

    pub async fn list_bases(&self) -> NocoDbResult<Value> {
        self.get_list("/meta/bases".to_string()).await
    }

    pub async fn get_base_info(&self, base_id: &str) -> NocoDbResult<Value> {
        self.get(format!("/meta/bases/{}/info", base_id)).await
    }

    pub async fn create_base(&self, title: &str, description: &str) -> NocoDbResult<Value> {
        let body = json!({ "title": title, "description": description });
        self.post("/meta/bases".to_string(), body).await
    }

    // ------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------

    pub async fn list_tables(&self, base_id: &str) -> NocoDbResult<Value> {
        self.get_list(format!("/meta/bases/{}/tables", base_id)).await
    }

    pub async fn get_table_info(&self, table_id: &str) -> NocoDbResult<Value> {
        self.get(format!("/meta/tables/{}", table_id)).await
    }

    pub async fn create_table(
        &self,
        base_id: &str,
        title: &str,
        table_name: &str,
        columns: Vec<JsonObject>,
    ) -> NocoDbResult<Value> {
        let body = json!({
            "table_name": table_name,
            "title": title,
            "columns": columns,
        });
        self.post(format!("/meta/bases/{}/tables", base_id), body).await
    }

    pub async fn delete_table(&self, table_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/meta/tables/{}", table_id)).await
    }

    pub async fn duplicate_table(&self, table_id: &str, options: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/meta/tables/{}/duplicate", table_id), Value::Object(options))
            .await
    }

    /// Full table metadata: columns, relations, views
    pub async fn get_table_schema(&self, table_id: &str) -> NocoDbResult<Value> {
        self.get(format!("/meta/tables/{}", table_id)).await
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    pub async fn create_column(&self, table_id: &str, column: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/meta/tables/{}/columns", table_id), Value::Object(column))
            .await
    }

    pub async fn update_column(
        &self,
        table_id: &str,
        column_id: &str,
        column: JsonObject,
    ) -> NocoDbResult<Value> {
        self.patch(
            format!("/meta/tables/{}/columns/{}", table_id, column_id),
            Value::Object(column),
        )
        .await
    }

    pub async fn delete_column(&self, table_id: &str, column_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/meta/tables/{}/columns/{}", table_id, column_id))
            .await
    }

    // ------------------------------------------------------------------
    // Views, filters, sorts
    // ------------------------------------------------------------------

    /// Create a view; `view["type"]` picks the endpoint and defaults to grid
    pub async fn create_view(&self, table_id: &str, view: JsonObject) -> NocoDbResult<Value> {
        let view_type = ViewType::of(&view)?;
        self.post(
            format!("/meta/tables/{}/{}", table_id, view_type.collection()),
            Value::Object(view),
        )
        .await
    }

    pub async fn list_views(&self, table_id: &str) -> NocoDbResult<Value> {
        self.get_list(format!("/meta/tables/{}/views", table_id)).await
    }

    pub async fn delete_view(&self, view_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/meta/views/{}", view_id)).await
    }

    pub async fn create_filter(&self, view_id: &str, filter: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/meta/views/{}/filters", view_id), Value::Object(filter))
            .await
    }

    pub async fn list_filters(&self, view_id: &str) -> NocoDbResult<Value> {
        self.get_list(format!("/meta/views/{}/filters", view_id)).await
    }

    pub async fn delete_filter(&self, filter_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/meta/filters/{}", filter_id)).await
    }

    pub async fn create_sort(&self, view_id: &str, sort: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/meta/views/{}/sorts", view_id), Value::Object(sort))
            .await
    }

    pub async fn list_sorts(&self, view_id: &str) -> NocoDbResult<Value> {
        self.get_list(format!("/meta/views/{}/sorts", view_id)).await
    }

    pub async fn delete_sort(&self, sort_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/meta/sorts/{}", sort_id)).await
    }

    // ------------------------------------------------------------------
    // Webhooks
    // ------------------------------------------------------------------

    pub async fn create_webhook(&self, table_id: &str, hook: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/meta/tables/{}/hooks", table_id), Value::Object(hook))
            .await
    }

    pub async fn list_webhooks(&self, table_id: &str) -> NocoDbResult<Value> {
        self.get_list(format!("/meta/tables/{}/hooks", table_id)).await
    }

    pub async fn delete_webhook(&self, hook_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/meta/hooks/{}", hook_id)).await
    }

    pub async fn test_webhook(&self, table_id: &str, hook: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/meta/tables/{}/hooks/test", table_id), Value::Object(hook))
            .await
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    pub async fn get_table_data(&self, table_id: &str, limit: u32, offset: u32) -> NocoDbResult<Value> {
        self.get(format!(
            "/tables/{}/records?limit={}&offset={}",
            table_id, limit, offset
        ))
        .await
    }

    pub async fn create_record(&self, table_id: &str, data: JsonObject) -> NocoDbResult<Value> {
        self.post(format!("/tables/{}/records", table_id), Value::Object(data))
            .await
    }

    pub async fn get_record(&self, table_id: &str, record_id: &str) -> NocoDbResult<Value> {
        self.get(format!("/tables/{}/records/{}", table_id, record_id))
            .await
    }

    pub async fn update_record(
        &self,
        table_id: &str,
        record_id: &str,
        data: JsonObject,
    ) -> NocoDbResult<Value> {
        self.patch(
            format!("/tables/{}/records/{}", table_id, record_id),
            Value::Object(data),
        )
        .await
    }

    pub async fn delete_record(&self, table_id: &str, record_id: &str) -> NocoDbResult<Value> {
        self.delete(format!("/tables/{}/records/{}", table_id, record_id))
            .await
    }

    pub async fn bulk_insert_records(
        &self,
        table_id: &str,
        records: Vec<JsonObject>,
    ) -> NocoDbResult<Value> {
        self.post(format!("/tables/{}/records", table_id), json!(records))
            .await
    }

    pub async fn bulk_update_records(
        &self,
        table_id: &str,
        records: Vec<JsonObject>,
    ) -> NocoDbResult<Value> {
        self.patch(format!("/tables/{}/records", table_id), json!(records))
            .await
    }

    pub async fn bulk_delete_records(
        &self,
        table_id: &str,
        record_ids: Vec<Value>,
    ) -> NocoDbResult<Value> {
        self.request(
            Method::DELETE,
            format!("/tables/{}/records", table_id),
            Some(json!({ "ids": record_ids })),
        )
        .await
    }

    /// Export table rows; non-JSON exports come back as a JSON string
    #[instrument(skip(self))]
    pub async fn export_table_data(&self, table_id: &str, format: ExportFormat) -> NocoDbResult<Value> {
        let body = self
            .send(
                Method::GET,
                format!("/tables/{}/export/{}", table_id, format.as_str()),
                None,
            )
            .await?;
        decode_export(body)
    }

    /// Count records; `where_clause` is passed to NocoDB verbatim
    pub async fn get_table_count(
        &self,
        table_id: &str,
        where_clause: Option<&str>,
    ) -> NocoDbResult<Value> {
        let mut endpoint = format!("/tables/{}/count?count=true", table_id);
        if let Some(filter) = where_clause.filter(|w| !w.is_empty()) {
            endpoint.push_str("&where=");
            endpoint.push_str(filter);
        }
        self.get(endpoint).await
    }
}

fn decode_json(body: &[u8]) -> NocoDbResult<Value> {
    if body.is_empty() {
        return Ok(Value::Object(JsonObject::new()));
    }
    serde_json::from_slice(body).map_err(NocoDbError::request)
}

fn decode_export(body: Vec<u8>) -> NocoDbResult<Value> {
    if let Ok(value) = decode_json(&body) {
        return Ok(value);
    }
    String::from_utf8(body).map(Value::String).map_err(|e| {
        NocoDbError::Request(format!(
            "export body is neither JSON nor UTF-8 text ({} bytes)",
            e.as_bytes().len()
        ))
    })
}

/// NocoDB wraps most listings as `{"list": [...], "pageInfo": {...}}` but
/// not all of them
fn unwrap_list(value: Value) -> Value {
    match value {
        Value::Object(mut map) => map.remove("list").unwrap_or_else(|| Value::Array(Vec::new())),
        other => other,
    }
}
