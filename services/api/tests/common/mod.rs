use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tower::ServiceExt;
use uuid::Uuid;

use purchase_api_lib::config::Config;
use purchase_api_lib::web::{
    self,
    rest::PAGE_SESSION_HEADER,
    state::{AppState, PageSessions},
};
use purchase_core::domain::CollectionPayload;
use purchase_core::ports::{Clock, CollectionEndpoint, PortError, PortResult};

/// A collection endpoint that records payloads and can be told to fail.
#[derive(Default)]
pub struct RecordingEndpoint {
    pub payloads: Mutex<Vec<CollectionPayload>>,
    pub fail: bool,
}

impl RecordingEndpoint {
    pub fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

#[async_trait]
impl CollectionEndpoint for RecordingEndpoint {
    async fn deliver(&self, payload: &CollectionPayload) -> PortResult<()> {
        self.payloads.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(PortError::Transport("network unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

/// A clock the test moves by hand.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()))
    }
}

impl ManualClock {
    pub fn advance_millis(&self, millis: i64) {
        *self.0.lock().unwrap() += Duration::milliseconds(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
}

pub fn test_config() -> Config {
    Config::from_lookup(|_| None).unwrap()
}

pub fn build_test_app(endpoint: Arc<dyn CollectionEndpoint>) -> TestApp {
    let clock = Arc::new(ManualClock::default());
    let sessions = Arc::new(PageSessions::new(endpoint, clock.clone()));

    let state = Arc::new(AppState {
        config: Arc::new(test_config()),
        clock: clock.clone(),
        sessions,
    });

    TestApp {
        router: web::router(state),
        clock,
    }
}

pub fn order_form(straight: u32, curved: u32, curved_gold: u32) -> serde_json::Value {
    serde_json::json!({
        "name": "Youssef",
        "phone": "01555555555",
        "governorate": "Cairo",
        "area": "Maadi",
        "address": "3 Road 9",
        "straightQuantity": straight,
        "curvedQuantity": curved,
        "curvedGoldQuantity": curved_gold,
    })
}

pub async fn post_json(
    app: &Router,
    page: Uuid,
    uri: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header(PAGE_SESSION_HEADER, page.to_string())
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_empty(app: &Router, page: Uuid, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(PAGE_SESSION_HEADER, page.to_string())
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, page: Option<Uuid>, uri: &str) -> Response<Body> {
    let mut request = Request::builder().method(Method::GET).uri(uri);
    if let Some(page) = page {
        request = request.header(PAGE_SESSION_HEADER, page.to_string());
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
