//! HTTP transport for the NocoDB API
//!
//! Every request goes to `{host}/api/v2{endpoint}` carrying the NocoDB token,
//! the Cloudflare Access service-token headers and a JSON content type.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{NocoDbError, NocoDbResult};
use crate::config::ConnectionConfig;

/// Path prefix of the NocoDB v2 REST API
pub(crate) const API_PREFIX: &str = "/api/v2";

const TOKEN_HEADER: &str = "xc-token";
const CF_CLIENT_ID_HEADER: &str = "cf-access-client-id";
const CF_CLIENT_SECRET_HEADER: &str = "cf-access-client-secret";

/// One outbound API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below `/api/v2`, including any query string
    pub endpoint: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful API response, body still undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub(crate) status: u16,
    pub body: Vec<u8>,
}

/// Performs exactly one round trip per call
///
/// Implementations report non-success statuses as [`NocoDbError::Request`];
/// a returned [`ApiResponse`] always carries a 2xx status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> NocoDbResult<ApiResponse>;
}

/// [`Transport`] backed by a pooled `reqwest` client
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ConnectionConfig) -> NocoDbResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(TOKEN_HEADER),
            sensitive_header(TOKEN_HEADER, &config.api_token)?,
        );
        headers.insert(
            HeaderName::from_static(CF_CLIENT_ID_HEADER),
            sensitive_header(CF_CLIENT_ID_HEADER, &config.cf_client_id)?,
        );
        headers.insert(
            HeaderName::from_static(CF_CLIENT_SECRET_HEADER),
            sensitive_header(CF_CLIENT_SECRET_HEADER, &config.cf_client_secret)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("nocodb-mcp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| NocoDbError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.host.clone(),
        })
    }

    /// Absolute URL for an endpoint below `/api/v2`
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, endpoint)
    }
}

fn sensitive_header(name: &str, value: &str) -> NocoDbResult<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        NocoDbError::Client(format!("{} contains characters not allowed in a header", name))
    })?;
    header.set_sensitive(true);
    Ok(header)
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, endpoint = %request.endpoint))]
    async fn send(&self, request: ApiRequest) -> NocoDbResult<ApiResponse> {
        let url = self.url(&request.endpoint);
        debug!("sending request");

        let mut builder = self.client.request(request.method, &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            debug!(error = %e, "transport failure");
            NocoDbError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(%status, "upstream returned an error status");
            let message = if text.trim().is_empty() {
                format!("HTTP {} for {}", status, url)
            } else {
                format!("HTTP {} for {}: {}", status, url, text.trim())
            };
            return Err(NocoDbError::Request(message));
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        Ok(ApiResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
