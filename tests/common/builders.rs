//! Test fixtures: snapshot and threshold builders plus a ready-to-call router.

use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use tower::ServiceExt;

use renewal_health::auth::{AdminAuthenticator, AdminContext};
use renewal_health::config::{AuthConfig, ThresholdConfig};
use renewal_health::health::{
    HealthAggregationService, HealthHistory, MetricsSnapshot, MetricsSnapshotProvider,
};
use renewal_health::web::{create_app, AppState};

pub const ADMIN_KEY: &str = "integration-admin-key";
pub const API_KEY_HEADER: &str = "x-admin-api-key";

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

pub fn authenticator() -> AdminAuthenticator {
    authenticator_with_key(ADMIN_KEY)
}

pub fn authenticator_with_key(key: &str) -> AdminAuthenticator {
    AdminAuthenticator::from_config(&AuthConfig {
        admin_api_key: key.to_string(),
        ..AuthConfig::default()
    })
    .unwrap()
}

pub fn admin_context() -> AdminContext {
    authenticator()
        .authenticate(Some(ADMIN_KEY.as_bytes()))
        .unwrap()
}

/// Builder for metrics snapshots
pub struct SnapshotBuilder {
    snapshot: MetricsSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            snapshot: MetricsSnapshot::empty(fixed_time()),
        }
    }

    pub fn failed_renewals(mut self, count: u64) -> Self {
        self.snapshot.failed_renewals_last_hour = count;
        self
    }

    pub fn contract_errors(mut self, count: u64) -> Self {
        self.snapshot.contract_errors_last_hour = count;
        self
    }

    pub fn agent_idle_for(mut self, idle: Duration) -> Self {
        self.snapshot.last_agent_activity = Some(self.snapshot.collected_at - idle);
        self
    }

    pub fn pending_reminders(mut self, count: u64) -> Self {
        self.snapshot.pending_reminders = count;
        self
    }

    pub fn build(self) -> MetricsSnapshot {
        self.snapshot
    }
}

/// Thresholds with every limit configured
pub fn full_thresholds() -> ThresholdConfig {
    ThresholdConfig {
        failed_renewals_per_hour: Some(10),
        contract_errors_per_hour: Some(5),
        agent_inactivity_hours: Some(24.0),
        max_pending_reminders: Some(500),
    }
}

pub fn build_service(
    provider: Arc<dyn MetricsSnapshotProvider>,
    thresholds: ThresholdConfig,
    capacity: usize,
) -> Arc<HealthAggregationService> {
    Arc::new(HealthAggregationService::new(
        provider,
        thresholds,
        Arc::new(HealthHistory::new(capacity)),
        std::time::Duration::from_secs(2),
    ))
}

pub fn build_app(service: Arc<HealthAggregationService>) -> Router {
    build_app_with_state(AppState::new(service, Arc::new(authenticator())))
}

pub fn build_app_with_state(state: AppState) -> Router {
    create_app(state, std::time::Duration::from_secs(10))
}

/// Issue a GET and decode the JSON body
pub async fn get_json(
    app: &Router,
    uri: &str,
    api_key: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let key = api_key.map(|key| HeaderValue::from_str(key).unwrap());
    get_json_with_header(app, uri, key).await
}

/// Issue a GET with an arbitrary raw API key header value
pub async fn get_json_with_header(
    app: &Router,
    uri: &str,
    api_key: Option<HeaderValue>,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }
    send(app, request.body(Body::empty()).unwrap()).await
}

/// POST a JSON body with the admin key
pub async fn post_json(
    app: &Router,
    uri: &str,
    api_key: Option<&str>,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }
    send(app, request.body(Body::from(body.to_string())).unwrap()).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        // axum extractor rejections are plain text
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}
