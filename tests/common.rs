// ABOUTME: Shared test utilities for OAuth2 client integration tests
// ABOUTME: Provides a recording mock transport, canned provider responses, and client setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_oauth2_client`

use async_trait::async_trait;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use pierre_oauth2_client::{
    HttpRequest, HttpResponse, HttpTransport, MemoryOptionStore, OAuth2Client, OptionStore,
    TransportError,
};
use serde_json::json;
use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex, Once};
use tracing::Level;

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
pub const CLIENT_ID: &str = "01234567891011.apps.googleusercontent.com";
pub const CLIENT_SECRET: &str = "jeDs8rKw_jDJW8MMf-ff8ejs";
pub const REDIRECT_URI: &str = "http://localhost/oauth";
pub const AUTH_CODE: &str = "4/wEr_dK8SDkjfpwmc98KejfiwJP-f4wm.kdowmnr82jvmeisjw94mKFIJE48mcEM";
pub const CALENDAR_URL: &str = "https://www.googleapis.com/auth/calendar";
pub const LOREM: &str = "Lorem ipsum dolor sit amet.";

/// Client type used throughout the integration tests
pub type TestClient = OAuth2Client<MemoryOptionStore, MockTransport>;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

/// Transport that records every request and replays queued responses
///
/// Clones share state, so a test can keep a handle after moving one into the client.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next request
    pub fn respond_with(&self, response: HttpResponse) {
        self.state
            .lock()
            .expect("mock transport lock")
            .responses
            .push_back(Ok(response));
    }

    /// Queue a transport failure for the next request
    pub fn fail_with(&self, error: TransportError) {
        self.state
            .lock()
            .expect("mock transport lock")
            .responses
            .push_back(Err(error));
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().expect("mock transport lock").requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().expect("mock transport lock").requests.len()
    }

    /// The single request sent so far
    pub fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().expect("mock transport lock");
        state.requests.push(request);
        state.responses.pop_front().unwrap_or_else(|| {
            Ok(HttpResponse::new(500, HeaderMap::new(), "no response queued"))
        })
    }
}

/// Response with a single `Content-Type` header
pub fn response(code: u16, content_type: &str, body: &str) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    HttpResponse::new(code, headers, body)
}

/// Form-encoded grant response
pub fn encoded_grant_response() -> HttpResponse {
    response(
        200,
        "x-www-form-urlencoded",
        "access_token=accessvalue&refresh_token=refreshvalue&expires_in=3600",
    )
}

/// JSON grant response
pub fn json_grant_response() -> HttpResponse {
    response(
        200,
        "application/json",
        r#"{"access_token":"accessvalue","refresh_token":"refreshvalue","expires_in":3600}"#,
    )
}

/// Plain resource response
pub fn query_response() -> HttpResponse {
    response(200, "text/html", LOREM)
}

/// Store with every option the token endpoint needs
pub fn google_options() -> MemoryOptionStore {
    let mut store = MemoryOptionStore::new();
    store.set("authurl", json!(AUTH_URL));
    store.set("tokenurl", json!(TOKEN_URL));
    store.set("clientid", json!(CLIENT_ID));
    store.set("clientsecret", json!(CLIENT_SECRET));
    store.set("redirecturi", json!(REDIRECT_URI));
    store
}

/// Client over `google_options()` and a fresh mock, plus a handle on the mock
pub fn google_client() -> (TestClient, MockTransport) {
    init_test_logging();
    let transport = MockTransport::new();
    let client = OAuth2Client::new(google_options(), transport.clone());
    (client, transport)
}

/// Client with no options at all
pub fn empty_client() -> (TestClient, MockTransport) {
    init_test_logging();
    let transport = MockTransport::new();
    let client = OAuth2Client::new(MemoryOptionStore::new(), transport.clone());
    (client, transport)
}

/// Decode a form body into ordered pairs
pub fn form_pairs(request: &HttpRequest) -> Vec<(String, String)> {
    let encoded = request.body.as_ref().map(|b| b.encode()).unwrap_or_default();
    serde_urlencoded::from_str(&encoded).unwrap()
}
