//! Shared HTTP response helpers for the JSON-RPC client.
//!
//! Centralizes the status-code check (non-success → [`ApiError::Status`]) so
//! the envelope handling in `rpc` only ever sees 2xx responses.

use crate::error::ApiError;

/// Longest body excerpt carried in [`ApiError::Status`].
const BODY_EXCERPT_CHARS: usize = 500;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Any other status becomes
/// [`ApiError::Status`] with the start of the response body. There is no
/// retry, whatever the status.
pub async fn check_response(
    method: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        method: method.to_string(),
        status,
        body: excerpt(&body),
    })
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(BODY_EXCERPT_CHARS).collect()
}
