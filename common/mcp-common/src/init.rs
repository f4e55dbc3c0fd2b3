//! Server initialization utilities
//!
//! Provides standardized tracing setup and stdio serving so every MCP
//! server in the workspace starts up the same way.

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Sets up logging to stderr (stdout is reserved for MCP protocol) with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG
/// - Default log level of `info` for the specified crate
///
/// Set `LOG_FORMAT=json` for structured JSON output (useful for production/log aggregation).
/// Default is human-readable text output.
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("nocodb_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    if json_logs_requested() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

fn json_logs_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Serve an already-constructed MCP server over stdio until the client disconnects
///
/// Servers that need configuration before they can be built (credentials,
/// endpoints) construct themselves in `main` and hand the instance over here.
///
/// # Example
///
/// ```rust,ignore
/// let server = NocoDbMcpServer::new(client);
/// mcp_common::serve_stdio(server).await?;
/// ```
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    let reason = service.waiting().await?;

    tracing::info!(?reason, "Server shutting down");
    Ok(())
}
