//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the BFF.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default GraphQL endpoint of the ikas admin API.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.myikas.com/api/v1/admin/graphql";

/// Path of the client-credentials endpoint, relative to the store URL.
pub const TOKEN_PATH: &str = "/api/admin/oauth/token";

/// Root configuration for the BFF proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BffConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream identity and GraphQL endpoints plus credentials.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Error disclosure and body limits.
    pub security: SecurityConfig,

    /// Cross-origin settings for the browser client.
    pub cors: CorsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
        }
    }
}

/// Upstream platform configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Explicit store base URL (e.g., "https://acme.myikas.com").
    pub store_url: Option<String>,

    /// Store name used to derive the store URL when `store_url` is unset.
    pub store_name: Option<String>,

    /// GraphQL API endpoint.
    pub graphql_url: String,

    /// OAuth2 client id.
    pub client_id: String,

    /// OAuth2 client secret. Never logged.
    pub client_secret: String,

    /// Fetch the custom attribute catalog at startup.
    pub prefetch_attributes: bool,
}

impl UpstreamConfig {
    /// Resolve the store base URL, preferring the explicit setting.
    pub fn resolved_store_url(&self) -> Option<String> {
        if let Some(url) = self.store_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Some(url.trim_end_matches('/').to_string());
        }
        self.store_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(|name| format!("https://{}.myikas.com", name.trim()))
    }

    /// Full URL of the client-credentials endpoint.
    pub fn token_url(&self) -> Option<String> {
        self.resolved_store_url().map(|base| format!("{}{}", base, TOKEN_PATH))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            store_url: None,
            store_name: None,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            prefetch_attributes: true,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("store_url", &self.store_url)
            .field("store_name", &self.store_name)
            .field("graphql_url", &self.graphql_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("prefetch_attributes", &self.prefetch_attributes)
            .finish()
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Per upstream call timeout (token exchange or GraphQL) in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 15,
            request_secs: 45,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Return upstream diagnostics in 500 bodies.
    pub expose_error_details: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            expose_error_details: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
}
