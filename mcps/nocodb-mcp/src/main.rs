//! NocoDB MCP Server
//!
//! Bridges an MCP client to a NocoDB instance behind Cloudflare Access.
//!
//! # Commands
//! - `serve` (default): speak MCP over stdio
//! - `check`: list bases once to verify host and credentials
//! - `tools`: print the tool catalogue
//!
//! # Configuration
//! `~/.nocodb-mcp/config.toml` (or `--config`), overridden by `NOCODB_HOST`,
//! `NOCODB_API_TOKEN`, `CF_ACCESS_CLIENT_ID` and `CF_ACCESS_CLIENT_SECRET`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use nocodb_mcp::{Catalogue, Config, NocoDbClient, NocoDbMcpServer};

#[derive(Parser)]
#[command(name = "nocodb-mcp")]
#[command(about = "MCP server for NocoDB behind Cloudflare Access")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: ~/.nocodb-mcp/config.toml)
    #[arg(long, env = "NOCODB_MCP_CONFIG", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server over stdio
    Serve,
    /// Verify connectivity by listing bases
    Check,
    /// Print the tool catalogue
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mcp_common::init_tracing("nocodb_mcp")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Tools => {
            print_tools();
            Ok(())
        }
        Commands::Check => check(connect(cli.config)?).await,
        Commands::Serve => {
            let server = NocoDbMcpServer::new(connect(cli.config)?);
            tracing::info!(tools = server.catalogue().len(), "starting NocoDB MCP server");
            mcp_common::serve_stdio(server).await
        }
    }
}

fn connect(config_path: Option<PathBuf>) -> Result<NocoDbClient> {
    let config = Config::load(config_path.as_deref())?;
    let connection = config.connection()?;
    tracing::info!(host = %connection.host, "using NocoDB host");
    NocoDbClient::connect(&connection).context("failed to create NocoDB client")
}

fn print_tools() {
    let catalogue = Catalogue::new();
    println!("{} tools:", catalogue.len());
    for entry in catalogue.iter() {
        println!("  {:<22} {}", entry.name(), entry.kind.description());
    }
}

async fn check(client: NocoDbClient) -> Result<()> {
    let bases = client
        .list_bases()
        .await
        .context("could not list bases")?;
    let bases = bases.as_array().cloned().unwrap_or_default();

    println!("Connected: {} base(s)", bases.len());
    for base in bases.iter().take(5) {
        let field = |key: &str| base.get(key).and_then(Value::as_str).unwrap_or("?").to_string();
        println!("  - {} ({})", field("title"), field("id"));
    }
    Ok(())
}
