use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Reconciliation API the page reads from
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        // Server validations
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        self.addr()?;
        // Upstream validations
        let endpoint = Url::parse(&self.upstream.endpoint)
            .map_err(|e| format!("upstream.endpoint is not a valid URL: {e}"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err("upstream.endpoint must use http or https".into());
        }
        if self.upstream.timeout_ms == 0 {
            return Err("upstream.timeout_ms must be > 0".into());
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    /// Listen address. The host must be an IP literal; names are not resolved.
    pub fn addr(&self) -> Result<SocketAddr, String> {
        let host: IpAddr = self.server.host.parse().map_err(|_| {
            format!(
                "server.host must be an IP address, got {:?}",
                self.server.host
            )
        })?;
        Ok(SocketAddr::from((host, self.server.port)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Outbound reconciliation API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full URL fetched with a plain GET on every page load
    #[serde(default = "default_upstream_endpoint")]
    pub endpoint: String,

    /// Whole-request timeout in milliseconds (connect + response + body)
    #[serde(default = "default_upstream_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_upstream_endpoint() -> String {
    "http://localhost:8000/reconcile".into()
}

fn default_upstream_timeout_ms() -> u64 {
    5000
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_upstream_endpoint(),
            timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Heading shown above the table
    #[serde(default = "default_page_title")]
    pub title: String,
}

fn default_page_title() -> String {
    reconview_core::render::DEFAULT_TITLE.into()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_page_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Default config file looked up in the working directory.
    pub const DEFAULT_CONFIG_FILE: &str = "reconview.toml";

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        }
        // Environment variable overrides, e.g., RECONVIEW__UPSTREAM__ENDPOINT=http://api:8000/reconcile
        builder = builder.add_source(
            Environment::with_prefix("RECONVIEW")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        // Validate
        merged.validate()?;
        Ok(merged)
    }
}
