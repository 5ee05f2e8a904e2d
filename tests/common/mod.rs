//! Shared test utilities: a local Namecheap stand-in and canned envelopes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use namecheap_rs::{Client, NamecheapConfig};
use tokio::net::TcpListener;

// Allow dead_code because these are shared utilities and not all test files use all items

#[allow(dead_code)]
pub const OK_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>namecheap.domains.getlist</RequestedCommand>
  <CommandResponse Type="namecheap.domains.getList">
    <DomainGetListResult>
      <Domain ID="127" Name="example.com" User="owner" Created="02/15/2016" Expires="02/15/2027" IsExpired="false" IsLocked="false" AutoRenew="true" WhoisGuard="ENABLED" />
      <Domain ID="381" Name="example.net" User="owner" Created="04/28/2016" Expires="04/28/2027" IsExpired="false" IsLocked="false" AutoRenew="false" WhoisGuard="NOTPRESENT" />
    </DomainGetListResult>
    <Paging>
      <TotalItems>2</TotalItems>
      <CurrentPage>1</CurrentPage>
      <PageSize>20</PageSize>
    </Paging>
  </CommandResponse>
  <Server>PHX01APIEXT01</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.011</ExecutionTime>
</ApiResponse>"#;

#[allow(dead_code)]
pub const ERROR_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011150">Parameter RequestIP is invalid</Error>
    <Error Number="1011102">Parameter APIKey is missing</Error>
    <Error Number="2011166">UserName is invalid</Error>
  </Errors>
  <Warnings />
  <RequestedCommand />
  <Server>PHX01APIEXT02</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0</ExecutionTime>
</ApiResponse>"#;

/// One request as seen by the mock server.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub params: HashMap<String, String>,
    pub connection: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A running mock server and everything it has received.
#[allow(dead_code)]
pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn config(&self) -> NamecheapConfig {
        NamecheapConfig {
            url: self.url.clone(),
            api_user: "apiuser".to_string(),
            user_name: "username".to_string(),
            api_key: "0123456789abcdef".to_string(),
            client_ip: "192.0.2.10".to_string(),
        }
    }

    pub fn client(&self) -> Client {
        Client::new(self.config()).expect("client should build")
    }
}

async fn record(
    state: &MockState,
    method: &'static str,
    headers: &HeaderMap,
    params: HashMap<String, String>,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        params,
        connection: headers
            .get("connection")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body.clone())
}

async fn handle_get(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    record(&state, "GET", &headers, params).await
}

async fn handle_post(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    record(&state, "POST", &headers, params).await
}

/// Starts a server on `127.0.0.1:0` answering `/xml.response` with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_server(status: u16, body: &str) -> MockServer {
    start_slow_mock_server(status, body, Duration::ZERO).await
}

/// Like [`start_mock_server`], but waits `delay` before answering.
#[allow(dead_code)]
pub async fn start_slow_mock_server(status: u16, body: &str, delay: Duration) -> MockServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).expect("valid status code"),
        body: body.to_string(),
        delay,
        requests: Arc::clone(&requests),
    };

    let app = Router::new()
        .route("/xml.response", get(handle_get).post(handle_post))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    MockServer {
        url: format!("http://{addr}/xml.response"),
        requests,
    }
}

/// Installs a test subscriber so `tracing` output shows up with `--nocapture`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
