//! Monitoring platform API access configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Path of the JSON-RPC endpoint below the frontend base URL.
pub const API_PATH: &str = "api_jsonrpc.php";

#[derive(Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Frontend base URL (e.g., `https://monitor.example.com/zabbix`).
    /// Empty means the operator is prompted.
    #[serde(default)]
    pub url: String,

    /// Login name. Empty means the operator is prompted.
    #[serde(default)]
    pub username: String,

    /// Login password. Empty means the operator is prompted without echo.
    #[serde(default)]
    pub password: String,

    /// Pre-issued API token. When set, no login call is made.
    #[serde(default)]
    pub token: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification (self-signed frontends).
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Send the session as an `Authorization: Bearer` header instead of the
    /// envelope's `auth` member.
    #[serde(default)]
    pub bearer_auth: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
            bearer_auth: false,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("token", &redacted(&self.token))
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("bearer_auth", &self.bearer_auth)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

impl ApiConfig {
    /// Normalized base URL, or `None` if not configured.
    pub fn base_url(&self) -> Option<String> {
        let base = normalize_base_url(&self.url);
        (!base.is_empty()).then_some(base)
    }

    /// Whether a pre-issued API token is available.
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// Trim surrounding whitespace and every trailing `/`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// JSON-RPC endpoint for a normalized base URL.
#[must_use]
pub fn endpoint_for(base_url: &str) -> String {
    format!("{base_url}/{API_PATH}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert!(config.url.is_empty());
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.accept_invalid_certs);
        assert!(!config.bearer_auth);
        assert!(!config.has_token());
    }

    #[test]
    fn base_url_trims_trailing_slashes() {
        let config = ApiConfig {
            url: "  https://monitor.example.com/zabbix/// ".into(),
            ..ApiConfig::default()
        };
        assert_eq!(
            config.base_url().as_deref(),
            Some("https://monitor.example.com/zabbix")
        );
    }

    #[test]
    fn slash_only_url_is_unset() {
        let config = ApiConfig {
            url: "///".into(),
            ..ApiConfig::default()
        };
        assert!(config.base_url().is_none());
    }

    #[test]
    fn endpoint_appends_rpc_path() {
        assert_eq!(
            endpoint_for("http://localhost/zabbix"),
            "http://localhost/zabbix/api_jsonrpc.php"
        );
    }

    #[test]
    fn blank_token_does_not_count() {
        let config = ApiConfig {
            url: "http://localhost".into(),
            token: "   ".into(),
            ..ApiConfig::default()
        };
        assert!(!config.has_token());
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ApiConfig {
            password: "hunter2".into(),
            token: "abc123".into(),
            ..ApiConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("<redacted>"));
    }
}
