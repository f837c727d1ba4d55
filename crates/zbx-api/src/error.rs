//! API client error types.

use thiserror::Error;

/// Errors that can occur when calling the monitoring platform's API.
///
/// None of these are recovered from: the audit stops at the first one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Endpoint unreachable, connection reset, timeout, or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error ({method}): status {status}: {body}")]
    Status {
        /// Remote procedure being called.
        method: String,
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// The call reached the platform, which reported an application error.
    #[error("API error ({method}): {message} - {data}")]
    Remote {
        /// Remote procedure being called.
        method: String,
        /// JSON-RPC error code.
        code: i64,
        /// Error message, verbatim.
        message: String,
        /// Diagnostic payload, verbatim.
        data: String,
    },

    /// The response was not a valid JSON-RPC envelope or had an unexpected shape.
    #[error("malformed response ({method}): {reason}")]
    Parse {
        /// Remote procedure being called.
        method: String,
        reason: String,
    },

    /// The configured base URL cannot be used as an endpoint.
    #[error("invalid endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),
}

impl ApiError {
    /// Whether the failure happened below the JSON-RPC layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}
