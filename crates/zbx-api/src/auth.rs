//! Session acquisition.

use serde_json::json;

use crate::{ApiClient, ApiError, Session};

impl ApiClient {
    /// Authenticate with a login name and password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] for rejected credentials, or any transport
    /// error from the call.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let params = json!({
            "username": username,
            "password": password,
        });
        let token: String = self.call("user.login", &params, None).await?;
        tracing::info!(username, "authenticated");
        Ok(Session::new(token))
    }
}
