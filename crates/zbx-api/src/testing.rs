//! Local fake JSON-RPC endpoint for tests.
//!
//! [`FakeApi`] binds `tiny_http` on `127.0.0.1:0` and answers each request
//! from a [`Scenario`]. The fake applies no server-side filters: every host
//! and every child row of the requested owner is returned, so the client's
//! own status/state checks are what keeps the output clean.
//!
//! Enabled for this crate's unit tests and, via the `test-server` feature,
//! for tests in dependent crates.

use std::io::Read;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use serde_json::{Value, json};

/// Token handed out by a successful `user.login`.
pub const SESSION_TOKEN: &str = "0424bd59b807674191e7d77572075f33";

/// One request as received by the fake endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }

    fn is_authorized(&self) -> bool {
        self.body["auth"] == SESSION_TOKEN
            || self.authorization.as_deref() == Some(format!("Bearer {SESSION_TOKEN}").as_str())
    }
}

/// Canned platform state served by [`FakeApi`].
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    login_error: Option<(String, String)>,
    method_errors: Vec<(String, String, String)>,
    http_status: Option<u16>,
    hosts: Vec<Value>,
    templates: Vec<Value>,
    items: Vec<(String, Value)>,
    rules: Vec<(String, Value)>,
}

impl Scenario {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host; `status` 0 is monitored, anything else is disabled.
    #[must_use]
    pub fn host(mut self, id: &str, name: &str, status: u8) -> Self {
        self.hosts.push(json!({
            "hostid": id,
            "name": name,
            "status": status.to_string(),
        }));
        self
    }

    #[must_use]
    pub fn template(mut self, id: &str, name: &str) -> Self {
        self.templates.push(json!({ "templateid": id, "name": name }));
        self
    }

    /// Add an item owned by host or template `owner_id`; `state` 1 is unsupported.
    #[must_use]
    pub fn item(mut self, owner_id: &str, name: &str, state: u8, error: &str) -> Self {
        let row = child_row(self.items.len() + self.rules.len(), name, state, Some(error));
        self.items.push((owner_id.to_string(), row));
        self
    }

    /// Add an unsupported item whose row carries no `error` member at all.
    #[must_use]
    pub fn item_without_error(mut self, owner_id: &str, name: &str) -> Self {
        let row = child_row(self.items.len() + self.rules.len(), name, 1, None);
        self.items.push((owner_id.to_string(), row));
        self
    }

    #[must_use]
    pub fn discovery_rule(mut self, owner_id: &str, name: &str, state: u8, error: &str) -> Self {
        let row = child_row(self.items.len() + self.rules.len(), name, state, Some(error));
        self.rules.push((owner_id.to_string(), row));
        self
    }

    /// Make `user.login` fail with an application error.
    #[must_use]
    pub fn reject_login(mut self, message: &str, data: &str) -> Self {
        self.login_error = Some((message.to_string(), data.to_string()));
        self
    }

    /// Make every call to `method` fail with an application error.
    #[must_use]
    pub fn fail_method(mut self, method: &str, message: &str, data: &str) -> Self {
        self.method_errors
            .push((method.to_string(), message.to_string(), data.to_string()));
        self
    }

    /// Answer every request with this HTTP status and an HTML body.
    #[must_use]
    pub const fn http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    fn reply(&self, request: &RecordedRequest) -> (u16, String) {
        if let Some(status) = self.http_status {
            return (status, "<html><body>Service Unavailable</body></html>".into());
        }

        let id = request.body["id"].clone();
        let method = request.method();

        if let Some((_, message, data)) = self.method_errors.iter().find(|(m, ..)| m == method) {
            return (200, error_envelope(&id, -32602, message, data));
        }

        if method == "user.login" {
            return match &self.login_error {
                Some((message, data)) => (200, error_envelope(&id, -32602, message, data)),
                None => (200, result_envelope(&id, &json!(SESSION_TOKEN))),
            };
        }

        if !request.is_authorized() {
            return (
                200,
                error_envelope(&id, -32602, "Invalid params.", "Not authorised."),
            );
        }

        let params = &request.body["params"];
        let result = match method {
            "host.get" => Value::Array(self.hosts.clone()),
            "template.get" => Value::Array(self.templates.clone()),
            "item.get" => owned_rows(&self.items, params),
            "discoveryrule.get" => owned_rows(&self.rules, params),
            other => {
                let data = format!("Incorrect API \"{other}\".");
                return (200, error_envelope(&id, -32601, "Method not found.", &data));
            }
        };
        (200, result_envelope(&id, &result))
    }
}

fn child_row(index: usize, name: &str, state: u8, error: Option<&str>) -> Value {
    let mut row = json!({
        "itemid": (23_000 + index).to_string(),
        "name": name,
        "state": state.to_string(),
    });
    if let Some(error) = error {
        row["error"] = Value::String(error.to_string());
    }
    row
}

fn owned_rows(rows: &[(String, Value)], params: &Value) -> Value {
    let owner = params["hostids"]
        .as_str()
        .or_else(|| params["templateids"].as_str())
        .unwrap_or_default();
    Value::Array(
        rows.iter()
            .filter(|(owner_id, _)| owner_id == owner)
            .map(|(_, row)| row.clone())
            .collect(),
    )
}

fn result_envelope(id: &Value, result: &Value) -> String {
    json!({ "jsonrpc": "2.0", "result": result, "id": id }).to_string()
}

fn error_envelope(id: &Value, code: i64, message: &str, data: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message, "data": data },
        "id": id,
    })
    .to_string()
}

/// A running fake endpoint. Stops when dropped.
pub struct FakeApi {
    server: Arc<tiny_http::Server>,
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    worker: Option<JoinHandle<()>>,
}

impl FakeApi {
    /// Start serving `scenario` on a random loopback port.
    ///
    /// # Panics
    ///
    /// Panics if no loopback port can be bound.
    #[must_use]
    pub fn start(scenario: Scenario) -> Self {
        let server =
            Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("fake API server should bind"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("fake API server should listen on an IP address");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let worker = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || serve(&server, &scenario, &requests))
        };

        Self {
            server,
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
            worker: Some(worker),
        }
    }

    /// Frontend base URL, as an operator would type it.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full JSON-RPC endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/api_jsonrpc.php", self.base_url)
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Methods called so far, in arrival order.
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| request.method().to_string())
            .collect()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn serve(server: &tiny_http::Server, scenario: &Scenario, log: &Mutex<Vec<RecordedRequest>>) {
    for mut request in server.incoming_requests() {
        let mut raw = String::new();
        let _ = request.as_reader().read_to_string(&mut raw);
        let authorization = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.to_string());
        let recorded = RecordedRequest {
            body: serde_json::from_str(&raw).unwrap_or(Value::Null),
            authorization,
        };

        let (status, payload) = scenario.reply(&recorded);
        log.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded);

        let content_type = tiny_http::Header::from_bytes("Content-Type", "application/json")
            .expect("static header is valid");
        let response = tiny_http::Response::from_string(payload)
            .with_status_code(status)
            .with_header(content_type);
        let _ = request.respond(response);
    }
}
