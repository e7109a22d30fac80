use std::sync::{Arc, Mutex};
use std::time::Duration;

use importdesk_core::{SessionListener, TokenStore};
use importdesk_infra::api::ApiClient;
use importdesk_infra::MemoryTokenStore;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REFRESH_DELAY: Duration = Duration::from_millis(300);

/// Session listener that records every expiry it is told about.
#[derive(Default)]
pub struct RecordingListener {
    paths: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn count(&self) -> usize {
        self.paths.lock().expect("listener mutex poisoned").len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("listener mutex poisoned").clone()
    }
}

impl SessionListener for RecordingListener {
    fn session_expired(&self, login_path: &str) {
        self.paths.lock().expect("listener mutex poisoned").push(login_path.to_string());
    }
}

/// Client, store and listener wired against a mock backend.
pub struct Harness {
    pub client: Arc<ApiClient>,
    pub store: Arc<MemoryTokenStore>,
    pub listener: Arc<RecordingListener>,
}

impl Harness {
    pub fn new(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Self {
        let store = Arc::new(MemoryTokenStore::from_parts(
            access.map(str::to_owned),
            refresh.map(str::to_owned),
        ));
        let listener = Arc::new(RecordingListener::default());

        let client = ApiClient::builder()
            .base_url(server.uri())
            .timeout(Duration::from_secs(5))
            .token_store(store.clone() as Arc<dyn TokenStore>)
            .session_listener(listener.clone() as Arc<dyn SessionListener>)
            .build()
            .expect("client should build");

        Self { client: Arc::new(client), store, listener }
    }

    pub async fn tokens(&self) -> (Option<String>, Option<String>) {
        (
            self.store.access_token().await.expect("memory store"),
            self.store.refresh_token().await.expect("memory store"),
        )
    }
}

/// Mount a delayed refresh endpoint that exchanges `r-old` for `new`/`r-new`.
pub async fn mount_refresh_success(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "r-old" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "new", "refresh_token": "r-new" }))
                .set_delay(REFRESH_DELAY),
        )
        .expect(expected_calls)
        .named("refresh")
        .mount(server)
        .await;
}

/// Mount a refresh endpoint that must never be called.
pub async fn mount_refresh_forbidden(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .named("refresh (must not be called)")
        .mount(server)
        .await;
}

/// Number of requests the server saw for `request_path`.
pub async fn hits(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
