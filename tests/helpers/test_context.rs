//! Test context for unified test setup
//!
//! `TestApp` builds the full router over the in-memory record store, a manual
//! clock and a temporary upload directory, and drives it with `oneshot`.

use std::sync::Arc;

use admissions_api::config::Settings;
use admissions_api::create_router;
use admissions_api::database::RecordStore;
use admissions_api::services::{DiskImageStorage, ImageStorage};
use admissions_api::state::AppState;
use admissions_api::utils::{Clock, ManualClock};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use super::test_data::MultipartPart;

/// Default admin credentials
pub const ADMIN_USER: &str = "karan";
pub const ADMIN_PASSWORD: &str = "12345678";

/// Response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// Error kind of a JSON error body
    pub fn error_kind(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    pub fn as_array(&self) -> &Vec<Value> {
        self.body.as_array().expect("response body is not a JSON array")
    }
}

/// In-process application under test
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Create an app with default settings
    pub fn new() -> Self {
        Self::with_settings(|_| {})
    }

    /// Create an app after adjusting the default settings
    pub fn with_settings(configure: impl FnOnce(&mut Settings)) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let mut settings = Settings::default();
        settings.database.url = "memory".to_string();
        settings.uploads.dir = upload_dir.path().to_string_lossy().into_owned();
        configure(&mut settings);

        let clock = Arc::new(ManualClock::new(start_time()));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let store = RecordStore::in_memory(shared_clock.clone());
        let images: Arc<dyn ImageStorage> = Arc::new(DiskImageStorage::from_config(&settings.uploads));

        let state = AppState::new(settings, store, images, shared_clock);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            clock,
            upload_dir,
        }
    }

    pub fn store(&self) -> &RecordStore {
        self.state.store()
    }

    /// Move the clock to the given instant
    pub fn at(&self, at: DateTime<Utc>) -> &Self {
        self.clock.set(at);
        self
    }

    /// Number of files currently in the upload directory
    pub fn stored_image_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .count()
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(build_request(Method::GET, uri, token, None)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(build_request(Method::DELETE, uri, token, None)).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.send(build_request(Method::POST, uri, token, Some(body))).await
    }

    /// POST a raw body with an explicit content type
    pub async fn post_raw(&self, uri: &str, token: Option<&str>, content_type: &str, body: Vec<u8>) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    pub async fn post_multipart(&self, uri: &str, token: Option<&str>, parts: &[MultipartPart]) -> TestResponse {
        let (content_type, body) = super::test_data::multipart_body(parts);
        self.post_raw(uri, token, &content_type, body).await
    }

    /// Log in with the default credentials and return the token
    pub async fn login(&self) -> String {
        let response = self
            .post_json(
                "/login",
                None,
                &serde_json::json!({ "UserId": ADMIN_USER, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);

        response.body["token"]
            .as_str()
            .expect("login response has no token")
            .to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Instant the manual clock starts at
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
}

fn build_request(method: Method, uri: &str, token: Option<&str>, json: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match json {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    builder.body(body).expect("Failed to build request")
}
