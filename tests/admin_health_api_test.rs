//! End-to-end tests for `GET /admin/health` through the axum router.

mod common;

use axum::http::{HeaderValue, StatusCode};
use chrono::Duration;
use std::sync::Arc;

use common::*;
use renewal_health::config::ThresholdConfig;
use renewal_health::error::SnapshotError;
use renewal_health::health::{MetricsSnapshot, PipelineActivityTracker, StaticSnapshotProvider};
use renewal_health::web::AppState;

fn healthy_app() -> axum::Router {
    let provider = Arc::new(StaticSnapshotProvider::new(SnapshotBuilder::new().build()));
    build_app(build_service(provider, full_thresholds(), 10))
}

#[tokio::test]
async fn test_missing_key_is_unauthorized() {
    let app = healthy_app();

    let (status, body) = get_json(&app, "/admin/health", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Unauthorized: Invalid admin API key" })
    );
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized_regardless_of_query() {
    let app = healthy_app();

    for uri in [
        "/admin/health",
        "/admin/health?history=false",
        "/admin/health?history=true&extra=1",
    ] {
        let (status, body) = get_json(&app, uri, Some("integration-admin-ke")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Unauthorized: Invalid admin API key");
    }
}

#[tokio::test]
async fn test_unauthorized_request_does_not_evaluate() {
    let provider = Arc::new(StaticSnapshotProvider::new(SnapshotBuilder::new().build()));
    let service = build_service(provider.clone(), full_thresholds(), 10);
    let app = build_app(service.clone());

    get_json(&app, "/admin/health", Some("nope")).await;

    assert_eq!(provider.calls(), 0);
    assert!(service.history().is_empty());
}

#[tokio::test]
async fn test_healthy_evaluation_returns_200() {
    let app = healthy_app();

    let (status, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["alerts"], serde_json::json!([]));
    assert_eq!(body["thresholds"]["failedRenewalsPerHour"], 10);
    assert_eq!(body["thresholds"]["contractErrorsPerHour"], 5);
    assert_eq!(body["metrics"]["failedRenewalsLastHour"], 0);
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
    assert!(body["history"].is_array());
}

#[tokio::test]
async fn test_unhealthy_evaluation_returns_503_with_report() {
    let snapshot = SnapshotBuilder::new()
        .failed_renewals(20)
        .contract_errors(9)
        .agent_idle_for(Duration::hours(30))
        .build();
    let provider = Arc::new(StaticSnapshotProvider::new(snapshot));
    let app = build_app(build_service(provider, full_thresholds(), 10));

    let (status, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");

    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0]["id"], "failed_renewals");
    assert_eq!(alerts[0]["value"], 20.0);
    assert_eq!(alerts[0]["threshold"], 10.0);
    assert_eq!(alerts[0]["severity"], "critical");
    assert!(alerts[0]["triggeredAt"].is_string());
    assert_eq!(alerts[1]["id"], "contract_errors");
    assert_eq!(alerts[2]["id"], "agent_inactive");
    assert_eq!(alerts[2]["severity"], "warning");
}

#[tokio::test]
async fn test_single_failed_renewal_breach() {
    let snapshot = SnapshotBuilder::new().failed_renewals(20).build();
    let thresholds = ThresholdConfig {
        failed_renewals_per_hour: Some(10),
        ..ThresholdConfig::default()
    };
    let provider = Arc::new(StaticSnapshotProvider::new(snapshot));
    let app = build_app(build_service(provider, thresholds, 10));

    let (status, body) = get_json(&app, "/admin/health?history=false", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["id"], "failed_renewals");
    assert_eq!(alerts[0]["value"], 20.0);
    assert_eq!(alerts[0]["threshold"], 10.0);
}

#[tokio::test]
async fn test_thresholds_present_even_when_empty() {
    let provider = Arc::new(StaticSnapshotProvider::new(SnapshotBuilder::new().build()));
    let app = build_app(build_service(provider, ThresholdConfig::default(), 10));

    let (status, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["thresholds"], serde_json::json!({}));
}

#[tokio::test]
async fn test_history_flag_semantics() {
    let app = healthy_app();

    let (_, body) = get_json(&app, "/admin/health?history=false", Some(ADMIN_KEY)).await;
    assert!(body.get("history").is_none());

    for uri in [
        "/admin/health",
        "/admin/health?history=true",
        "/admin/health?history=FALSE",
        "/admin/health?history=0",
        "/admin/health?history=",
    ] {
        let (_, body) = get_json(&app, uri, Some(ADMIN_KEY)).await;
        assert!(body["history"].is_array(), "{uri} should include history");
    }
}

#[tokio::test]
async fn test_history_recorded_even_when_not_requested() {
    let provider = Arc::new(StaticSnapshotProvider::new(SnapshotBuilder::new().build()));
    let service = build_service(provider.clone(), full_thresholds(), 10);
    let app = build_app(service.clone());

    for _ in 0..3 {
        get_json(&app, "/admin/health?history=false", Some(ADMIN_KEY)).await;
    }
    let (_, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(provider.calls(), 4);
    assert_eq!(body["history"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_snapshot_failure_returns_generic_500() {
    let provider = Arc::new(StaticSnapshotProvider::failing(SnapshotError::Collection(
        "relation \"renewal_events\" does not exist".to_string(),
    )));
    let service = build_service(provider, full_thresholds(), 10);
    let app = build_app(service.clone());

    let (status, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to fetch health status" })
    );
    assert!(!body.to_string().contains("renewal_events"));
    assert!(service.history().is_empty());
}

#[tokio::test]
async fn test_liveness_is_public() {
    let app = healthy_app();

    let (status, body) = get_json(&app, "/health/live", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_metrics_echo_snapshot() {
    let snapshot: MetricsSnapshot = SnapshotBuilder::new().pending_reminders(42).build();
    let provider = Arc::new(StaticSnapshotProvider::new(snapshot));
    let app = build_app(build_service(provider, full_thresholds(), 10));

    let (_, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(body["metrics"]["pendingReminders"], 42);
    assert_eq!(body["metrics"]["collectedAt"], "2026-06-15T12:00:00Z");
}

#[tokio::test]
async fn test_opaque_header_bytes_are_unauthorized() {
    let provider = Arc::new(StaticSnapshotProvider::new(SnapshotBuilder::new().build()));
    let service = build_service(provider.clone(), full_thresholds(), 10);
    let app = build_app(service.clone());

    for raw in [&b"integration-admin-key\xff"[..], &b"\x80\x81"[..], &b"key\twith-tab"[..]] {
        let value = HeaderValue::from_bytes(raw).unwrap();
        let (status, body) = get_json_with_header(&app, "/admin/health", Some(value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized: Invalid admin API key");
    }

    assert_eq!(provider.calls(), 0);
    assert!(service.history().is_empty());
}

#[tokio::test]
async fn test_non_ascii_admin_key_authenticates_as_raw_bytes() {
    let provider = Arc::new(StaticSnapshotProvider::new(SnapshotBuilder::new().build()));
    let service = build_service(provider, full_thresholds(), 10);
    let key = "clé-d'administration";
    let app = build_app_with_state(AppState::new(
        service,
        Arc::new(authenticator_with_key(key)),
    ));

    let value = HeaderValue::from_bytes(key.as_bytes()).unwrap();
    let (status, body) = get_json_with_header(&app, "/admin/health", Some(value)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

fn tracked_app() -> (axum::Router, Arc<PipelineActivityTracker>) {
    let tracker = Arc::new(PipelineActivityTracker::new());
    let service = build_service(tracker.clone(), full_thresholds(), 10);
    let state = AppState::new(service, Arc::new(authenticator()))
        .with_activity_tracker(tracker.clone());
    (build_app_with_state(state), tracker)
}

#[tokio::test]
async fn test_unfed_tracker_reports_failure_not_healthy() {
    let (app, _tracker) = tracked_app();

    let (status, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch health status");
}

#[tokio::test]
async fn test_activity_ingestion_drives_evaluation() {
    let (app, tracker) = tracked_app();

    for _ in 0..11 {
        let (status, _) = post_json(
            &app,
            "/admin/activity",
            Some(ADMIN_KEY),
            serde_json::json!({ "kind": "renewal_failure" }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }
    post_json(
        &app,
        "/admin/activity",
        Some(ADMIN_KEY),
        serde_json::json!({ "kind": "agent_activity" }),
    )
    .await;

    assert!(tracker.has_reported());
    let (status, body) = get_json(&app, "/admin/health", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["metrics"]["failedRenewalsLastHour"], 11);
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["id"], "failed_renewals");
}

#[tokio::test]
async fn test_activity_ingestion_requires_admin_key() {
    let (app, tracker) = tracked_app();

    let (status, body) = post_json(
        &app,
        "/admin/activity",
        Some("wrong"),
        serde_json::json!({ "kind": "pending_reminders", "count": 3 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized: Invalid admin API key");
    assert!(!tracker.has_reported());
}

#[tokio::test]
async fn test_activity_route_absent_without_tracker() {
    let app = healthy_app();

    let (status, _) = post_json(
        &app,
        "/admin/activity",
        Some(ADMIN_KEY),
        serde_json::json!({ "kind": "renewal_failure" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
