//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the responder server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResponderConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Redirect behaviour shared by all redirect responses.
    pub redirect: RedirectConfig,

    /// Download directory exposure.
    pub downloads: DownloadConfig,

    /// Static redirect rules.
    pub redirects: Vec<RedirectRule>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable output.
    pub json_logs: bool,

    pub metrics_enabled: bool,

    /// Prometheus scrape address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "http_responder=info,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Status used when a redirect does not name one.
    pub default_status: u16,

    /// Take the scheme of resolved locations from `X-Forwarded-Proto`.
    pub trust_forwarded_proto: bool,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            default_status: 302,
            trust_forwarded_proto: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Serve files from `directory` under `route_prefix`.
    pub enabled: bool,

    pub directory: String,

    pub route_prefix: String,

    /// Chunk size used when streaming a file body.
    pub read_buffer_bytes: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: "./public".to_string(),
            route_prefix: "/downloads".to_string(),
            read_buffer_bytes: 64 * 1024,
        }
    }
}

/// A static redirect served on `GET <from>`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RedirectRule {
    /// Route path (must start with `/`).
    pub from: String,

    /// Absolute URL, absolute path or `./` relative path.
    pub to: String,

    /// Redirect status; the configured default when absent.
    #[serde(default)]
    pub status: Option<u16>,
}
