//! JSON-RPC 2.0 envelope handling.

use std::fmt;
use std::sync::atomic::Ordering;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ApiClient;
use crate::error::ApiError;
use crate::http::check_response;

/// Authentication token returned by the login call.
///
/// Lives for the whole run. The `Debug` output never shows the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(<redacted>)")
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a str>,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

impl ApiClient {
    /// Issue one remote procedure call and decode its `result`.
    ///
    /// `session` is `None` only for the login call. The session goes into the
    /// envelope's `auth` member, or into an `Authorization: Bearer` header
    /// when the client was built with `bearer_auth`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] / [`ApiError::Status`] when the request does
    ///   not complete with a 2xx response.
    /// - [`ApiError::Remote`] when the envelope carries an `error` member.
    /// - [`ApiError::Parse`] when the body is not an envelope or `result`
    ///   does not have the expected shape.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &Value,
        session: Option<&Session>,
    ) -> Result<T, ApiError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let in_body = session.filter(|_| !self.bearer_auth).map(Session::as_str);
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth: in_body,
        };

        let mut builder = self.http.post(&self.endpoint).json(&request);
        if self.bearer_auth {
            if let Some(session) = session {
                builder = builder.bearer_auth(session.as_str());
            }
        }

        tracing::debug!(method, id, "rpc call");
        let resp = check_response(method, builder.send().await?).await?;
        let text = resp.text().await?;
        decode_envelope(method, &text)
    }
}

/// Split a JSON-RPC response body into its result or its error.
fn decode_envelope<T: DeserializeOwned>(method: &str, body: &str) -> Result<T, ApiError> {
    let parse_error = |reason: String| ApiError::Parse {
        method: method.to_string(),
        reason,
    };

    let envelope: RpcResponse =
        serde_json::from_str(body).map_err(|e| parse_error(format!("not a JSON-RPC envelope: {e}")))?;

    if let Some(error) = envelope.error {
        return Err(ApiError::Remote {
            method: method.to_string(),
            code: error.code,
            message: error.message,
            data: payload_text(error.data),
        });
    }

    let result = envelope
        .result
        .ok_or_else(|| parse_error("envelope has neither result nor error".into()))?;
    serde_json::from_value(result).map_err(|e| parse_error(format!("unexpected result shape: {e}")))
}

/// Render an error `data` member verbatim: strings as-is, other JSON as JSON.
fn payload_text(data: Value) -> String {
    match data {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Deserialize a flag the platform may send as `"1"` or `1`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number flag, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_omits_auth_without_session() {
        let params = json!({"username": "Admin", "password": "zabbix"});
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "user.login",
            params: &params,
            id: 1,
            auth: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "user.login",
                "params": {"username": "Admin", "password": "zabbix"},
                "id": 1
            })
        );
    }

    #[test]
    fn decodes_result() {
        let token: String =
            decode_envelope("user.login", r#"{"jsonrpc":"2.0","result":"0424bd59","id":1}"#)
                .unwrap();
        assert_eq!(token, "0424bd59");
    }

    #[test]
    fn decodes_remote_error_verbatim() {
        let body = r#"{
            "jsonrpc": "2.0",
            "error": {
                "code": -32602,
                "message": "Login name or password is incorrect",
                "data": "Incorrect user name or password or account is temporarily blocked."
            },
            "id": 1
        }"#;
        let err = decode_envelope::<String>("user.login", body).unwrap_err();
        match err {
            ApiError::Remote {
                method,
                code,
                message,
                data,
            } => {
                assert_eq!(method, "user.login");
                assert_eq!(code, -32602);
                assert_eq!(message, "Login name or password is incorrect");
                assert!(data.starts_with("Incorrect user name"));
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn remote_error_display_includes_message_and_data() {
        let body = r#"{"error":{"code":-32500,"message":"Application error.","data":"No permissions."}}"#;
        let err = decode_envelope::<Value>("host.get", body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (host.get): Application error. - No permissions."
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn structured_error_data_is_kept_as_json() {
        let body = r#"{"error":{"code":1,"message":"m","data":{"field":"hostids"}}}"#;
        let err = decode_envelope::<Value>("item.get", body).unwrap_err();
        assert!(matches!(err, ApiError::Remote { data, .. } if data == r#"{"field":"hostids"}"#));
    }

    #[test]
    fn non_json_body_is_parse_error() {
        let err = decode_envelope::<Value>("host.get", "<html>login</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn empty_envelope_is_parse_error() {
        let err = decode_envelope::<Value>("host.get", r#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert!(err.to_string().contains("neither result nor error"));
    }

    #[test]
    fn wrong_result_shape_is_parse_error() {
        let err = decode_envelope::<String>("user.login", r#"{"result":[1,2]}"#).unwrap_err();
        assert!(err.to_string().contains("unexpected result shape"));
    }

    #[test]
    fn session_debug_is_redacted() {
        let session = Session::new("0424bd59b807674191e7d77572075f33");
        assert_eq!(format!("{session:?}"), "Session(<redacted>)");
    }
}
