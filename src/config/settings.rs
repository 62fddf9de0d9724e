use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::template::RenderPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub dex: DexConfig,
    #[serde(default)]
    pub template: RenderPolicy,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Max characters of any reply sent back to chat
    #[serde(default = "default_max_reply_length")]
    pub max_reply_length: usize,
    /// Max characters of the webhook username (Discord limit)
    #[serde(default = "default_username_max_length")]
    pub username_max_length: usize,
    /// Max characters of the webhook message content (Discord limit)
    #[serde(default = "default_content_max_length")]
    pub content_max_length: usize,
    /// Longest accepted `msg_pattern`, in characters
    #[serde(default = "default_max_pattern_length")]
    pub max_pattern_length: usize,
    /// Compiled program size limit for `msg_pattern`, in bytes
    #[serde(default = "default_regex_size_limit")]
    pub regex_size_limit: usize,
    /// Per-request timeout for outbound calls; unset keeps the client default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexConfig {
    /// JSON data file; the bundled sample data is used when unset
    #[serde(default)]
    pub data_path: Option<String>,
    /// Chat command word shown in help and suggestions
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_max_reply_length")]
    pub max_length: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

/// OpenTelemetry exporter settings
#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_reply_length() -> usize {
    400 // chat message limit
}

fn default_username_max_length() -> usize {
    32
}

fn default_content_max_length() -> usize {
    2000
}

fn default_max_pattern_length() -> usize {
    1024
}

fn default_regex_size_limit() -> usize {
    10 * (1 << 20) // 10 MiB, same as the regex crate default
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_command() -> String {
    "!dex".to_string()
}

fn default_max_suggestions() -> usize {
    3
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("relay.max_reply_length", default_max_reply_length() as i64)?
            .set_default("dex.command", default_command())?
            .set_default("template.treat_falsy_as_missing", true)?
            .set_default("otel.enabled", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__PORT, RELAY__REQUEST_TIMEOUT_SECS, DEX__DATA_PATH, OTEL__ENABLED, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            // Hosting platforms hand out the listen port as PORT
            .set_override_option("server.port", env::var("PORT").ok())?;

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            relay: RelayConfig::default(),
            dex: DexConfig::default(),
            template: RenderPolicy::default(),
            otel: OtelConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_reply_length: default_max_reply_length(),
            username_max_length: default_username_max_length(),
            content_max_length: default_content_max_length(),
            max_pattern_length: default_max_pattern_length(),
            regex_size_limit: default_regex_size_limit(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            command: default_command(),
            max_length: default_max_reply_length(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}
