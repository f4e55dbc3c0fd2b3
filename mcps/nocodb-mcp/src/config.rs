//! Configuration loading for nocodb-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variables (highest priority): NOCODB_HOST, NOCODB_API_TOKEN,
//!    CF_ACCESS_CLIENT_ID, CF_ACCESS_CLIENT_SECRET, NOCODB_TIMEOUT_SECS
//! 2. The TOML file given by `--config` / NOCODB_MCP_CONFIG
//! 3. ~/.nocodb-mcp/config.toml
//! 4. Default values
//!
//! ```toml
//! [nocodb]
//! host = "nocodb.example.com"
//! api_token = "..."
//! timeout_secs = 30
//!
//! [cloudflare]
//! client_id = "....access"
//! client_secret = "..."
//! ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "NOCODB_MCP_CONFIG";
pub const ENV_HOST: &str = "NOCODB_HOST";
pub const ENV_API_TOKEN: &str = "NOCODB_API_TOKEN";
pub const ENV_CF_CLIENT_ID: &str = "CF_ACCESS_CLIENT_ID";
pub const ENV_CF_CLIENT_SECRET: &str = "CF_ACCESS_CLIENT_SECRET";
pub const ENV_TIMEOUT_SECS: &str = "NOCODB_TIMEOUT_SECS";

const REDACTED: &str = "<redacted>";

/// Main configuration structure
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// NocoDB instance settings
    #[serde(default)]
    pub nocodb: NocoDbConfig,
    /// Cloudflare Access service token
    #[serde(default)]
    pub cloudflare: CloudflareConfig,
}

/// NocoDB instance settings
#[derive(Clone, Serialize, Deserialize)]
pub struct NocoDbConfig {
    /// Host name or base URL; `https://` is assumed when no scheme is given
    #[serde(default)]
    pub host: Option<String>,
    /// API token sent as `xc-token`
    #[serde(default)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Cloudflare Access service-token credentials
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CloudflareConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for NocoDbConfig {
    fn default() -> Self {
        Self {
            host: None,
            api_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Resolved, immutable connection settings handed to the HTTP transport
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Base URL without trailing slash, e.g. `https://nocodb.example.com`
    pub host: String,
    pub api_token: String,
    pub cf_client_id: String,
    pub cf_client_secret: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from file (if any) and apply environment overrides
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                tracing::info!("No config path available, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// ~/.nocodb-mcp/config.toml
    fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".nocodb-mcp").join("config.toml"))
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = non_empty(ENV_HOST) {
            self.nocodb.host = Some(host);
        }
        if let Some(token) = non_empty(ENV_API_TOKEN) {
            self.nocodb.api_token = Some(token);
        }
        if let Some(id) = non_empty(ENV_CF_CLIENT_ID) {
            self.cloudflare.client_id = Some(id);
        }
        if let Some(secret) = non_empty(ENV_CF_CLIENT_SECRET) {
            self.cloudflare.client_secret = Some(secret);
        }
        if let Some(timeout) = non_empty(ENV_TIMEOUT_SECS) {
            self.nocodb.timeout_secs = timeout.trim().parse().map_err(|_| {
                anyhow::anyhow!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, timeout)
            })?;
        }
        Ok(())
    }

    /// Resolve the connection settings, naming every missing value
    pub fn connection(&self) -> Result<ConnectionConfig> {
        let mut missing = Vec::new();
        let mut require = |value: &Option<String>, name: &str, env: &str| -> String {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => {
                    missing.push(format!("{} ({})", name, env));
                    String::new()
                }
            }
        };

        let host = require(&self.nocodb.host, "nocodb.host", ENV_HOST);
        let api_token = require(&self.nocodb.api_token, "nocodb.api_token", ENV_API_TOKEN);
        let cf_client_id = require(&self.cloudflare.client_id, "cloudflare.client_id", ENV_CF_CLIENT_ID);
        let cf_client_secret = require(
            &self.cloudflare.client_secret,
            "cloudflare.client_secret",
            ENV_CF_CLIENT_SECRET,
        );

        if !missing.is_empty() {
            bail!("missing NocoDB connection settings: {}", missing.join(", "));
        }
        if self.nocodb.timeout_secs == 0 {
            bail!("nocodb.timeout_secs must be greater than zero");
        }

        Ok(ConnectionConfig {
            host: normalize_host(&host),
            api_token,
            cf_client_id,
            cf_client_secret,
            timeout: Duration::from_secs(self.nocodb.timeout_secs),
        })
    }
}

/// `nocodb.example.com/` -> `https://nocodb.example.com`
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        REDACTED
    } else {
        "<unset>"
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("nocodb", &self.nocodb)
            .field("cloudflare", &self.cloudflare)
            .finish()
    }
}

impl fmt::Debug for NocoDbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NocoDbConfig")
            .field("host", &self.host)
            .field("api_token", &redact(&self.api_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for CloudflareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .finish()
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("api_token", &REDACTED)
            .field("cf_client_id", &self.cf_client_id)
            .field("cf_client_secret", &REDACTED)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn full_config() -> Config {
        let mut config = Config::default();
        config
            .apply_overrides(|key| {
                let vars: HashMap<&str, &str> = [
                    (ENV_HOST, "nocodb.example.com/"),
                    (ENV_API_TOKEN, "tok-123"),
                    (ENV_CF_CLIENT_ID, "abc.access"),
                    (ENV_CF_CLIENT_SECRET, "shh"),
                ]
                .into_iter()
                .collect();
                vars.get(key).map(|v| v.to_string())
            })
            .unwrap();
        config
    }

    #[test]
    fn default_path_lives_under_the_home_directory() {
        let path = Config::default_config_path();

        assert_eq!(
            path,
            dirs::home_dir().map(|home| home.join(".nocodb-mcp").join("config.toml"))
        );
        if let Some(path) = path {
            assert!(path.ends_with(".nocodb-mcp/config.toml"));
        }
    }

    #[test]
    fn defaults_have_thirty_second_timeout() {
        let config = Config::default();
        assert_eq!(config.nocodb.timeout_secs, 30);
        assert!(config.nocodb.host.is_none());
    }

    #[test]
    fn file_values_are_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[nocodb]\nhost = \"https://db.internal:8080\"\napi_token = \"file-token\"\ntimeout_secs = 5\n\n[cloudflare]\nclient_id = \"id\"\nclient_secret = \"secret\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        let conn = config.connection().unwrap();

        assert_eq!(conn.host, "https://db.internal:8080");
        assert_eq!(conn.api_token, "file-token");
        assert_eq!(conn.timeout, Duration::from_secs(5));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config: Config = toml::from_str("[nocodb]\nhost = \"old.example.com\"").unwrap();
        config
            .apply_overrides(|key| (key == ENV_HOST).then(|| "new.example.com".to_string()))
            .unwrap();
        assert_eq!(config.nocodb.host.as_deref(), Some("new.example.com"));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let mut config: Config = toml::from_str("[nocodb]\napi_token = \"keep\"").unwrap();
        config
            .apply_overrides(|key| (key == ENV_API_TOKEN).then(|| "  ".to_string()))
            .unwrap();
        assert_eq!(config.nocodb.api_token.as_deref(), Some("keep"));
    }

    #[test]
    fn invalid_timeout_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn connection_normalizes_bare_host() {
        let conn = full_config().connection().unwrap();
        assert_eq!(conn.host, "https://nocodb.example.com");
        assert_eq!(conn.cf_client_id, "abc.access");
    }

    #[test]
    fn connection_names_every_missing_value() {
        let err = Config::default().connection().unwrap_err().to_string();
        assert!(err.contains("nocodb.host (NOCODB_HOST)"));
        assert!(err.contains("nocodb.api_token (NOCODB_API_TOKEN)"));
        assert!(err.contains("cloudflare.client_id (CF_ACCESS_CLIENT_ID)"));
        assert!(err.contains("cloudflare.client_secret (CF_ACCESS_CLIENT_SECRET)"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = full_config();
        let conn = config.connection().unwrap();

        for rendered in [format!("{:?}", config), format!("{:?}", conn)] {
            assert!(!rendered.contains("tok-123"));
            assert!(!rendered.contains("shh"));
            assert!(rendered.contains(REDACTED));
        }
    }

    #[test]
    fn host_with_scheme_is_kept() {
        assert_eq!(normalize_host("http://localhost:8080/"), "http://localhost:8080");
        assert_eq!(normalize_host(" db.example.com "), "https://db.example.com");
    }
}
