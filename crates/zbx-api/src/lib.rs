//! # zbx-api
//!
//! JSON-RPC client and entity enumeration for zbx-audit.
//!
//! Talks to the monitoring platform's `api_jsonrpc.php` endpoint:
//! - `user.login` to obtain a [`Session`]
//! - `template.get` / `host.get` to enumerate owning entities
//! - `item.get` / `discoveryrule.get` to find unsupported children
//!
//! Calls are strictly sequential and nothing is retried. The first transport
//! or application error ends the audit.

pub mod auth;
pub mod entities;
pub mod unsupported;

mod error;
mod http;
mod rpc;

#[cfg(any(test, feature = "test-server"))]
pub mod testing;

pub use error::ApiError;
pub use rpc::Session;

use std::sync::atomic::AtomicU64;
use std::time::Duration;

/// Host `status` value of an actively monitored host.
pub const HOST_STATUS_MONITORED: &str = "0";

/// Item / discovery rule `state` value of an unsupported entity.
pub const STATE_NOT_SUPPORTED: &str = "1";

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
    pub bearer_auth: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            bearer_auth: false,
        }
    }
}

/// JSON-RPC client bound to one platform endpoint.
///
/// The client holds no session: callers pass the [`Session`] into every
/// call after login.
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_auth: bool,
    next_id: AtomicU64,
}

impl ApiClient {
    /// Create a client for the JSON-RPC endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if `endpoint` is not an http(s)
    /// URL, or [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: &str, options: &ClientOptions) -> Result<Self, ApiError> {
        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ApiError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("zbx-audit/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            bearer_auth: options.bearer_auth,
            next_id: AtomicU64::new(1),
        })
    }

    /// The endpoint every call is posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
