use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use bright_aware::{
    api::create_router,
    config::AssetConfig,
    engine::UvReading,
    sources::{SimulatedSource, UnconfiguredSource, UvSource},
    state::AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with(source: Arc<dyn UvSource>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        5050,
        "127.0.0.1".to_string(),
        source,
        AssetConfig::default(),
    ));
    (create_router(Arc::clone(&state)), state)
}

fn router() -> (Router, Arc<AppState>) {
    router_with(Arc::new(UnconfiguredSource))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = router();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn recommendation_is_pure() {
    let (app, state) = router();
    let (status, body) = send(&app, "GET", "/recommendation?uv_index=8&sunset_imminent=false", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "VERY_HIGH");
    assert_eq!(body["interval_seconds"], 2700);
    assert_eq!(body["requires_protection"], true);
    assert!(state.get_reading_state().unwrap().reading.is_none());

    let (status, body) = send(&app, "GET", "/recommendation?uv_index=8&sunset_imminent=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interval_seconds"], 0);
    assert_eq!(body["advice"], "No sunscreen needed");
}

#[tokio::test]
async fn negative_index_is_unprocessable() {
    let (app, _) = router();
    let (status, body) = send(&app, "GET", "/recommendation?uv_index=-2", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");

    let (status, _) = send(&app, "POST", "/uv", Some(json!({"index": -1.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn reading_then_reset_starts_countdown() {
    let (app, _) = router();
    let (status, body) = send(&app, "POST", "/uv", Some(json!({"index": 4.2, "sunset_imminent": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"]["color"], "yellow");
    assert_eq!(body["recommendation"]["interval_seconds"], 5400);

    let (status, body) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["remaining_seconds"], 5400);
    assert_eq!(body["display"], "01:30:00");

    let (status, body) = send(&app, "POST", "/timer/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
}

#[tokio::test]
async fn timer_controls_refused_when_no_protection_needed() {
    let (app, _) = router();
    let (status, _) = send(&app, "POST", "/timer/toggle", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, "POST", "/uv", Some(json!({"index": 0.0}))).await;
    let (status, body) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "cannot reset: no sunscreen needed");

    send(&app, "POST", "/uv", Some(json!({"index": 9.0, "sunset_imminent": true}))).await;
    let (status, _) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn custom_duration_accepts_form_text() {
    let (app, _) = router();
    let (status, body) = send(&app, "POST", "/timer/custom", Some(json!({"hours": "1", "minutes": "30"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining_seconds"], 5400);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn custom_duration_reads_leading_digits() {
    let (app, _) = router();
    let (status, body) = send(&app, "POST", "/timer/custom", Some(json!({"hours": "1.5", "minutes": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining_seconds"], 3600);

    let (status, body) = send(&app, "POST", "/timer/custom", Some(json!({"hours": "2h", "minutes": " 30min"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining_seconds"], 9000);
}

#[tokio::test]
async fn zero_custom_duration_leaves_timer_alone() {
    let (app, state) = router();
    send(&app, "POST", "/timer/duration", Some(json!({"seconds": 90}))).await;
    let before = state.get_timer_state().unwrap();

    let (status, _) = send(&app, "POST", "/timer/custom", Some(json!({"hours": "abc", "minutes": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.get_timer_state().unwrap(), before);
}

#[tokio::test]
async fn invalid_transitions_conflict() {
    let (app, _) = router();
    let (status, body) = send(&app, "POST", "/timer/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "cannot pause while timer is idle");

    send(&app, "POST", "/timer/custom", Some(json!({"minutes": 5}))).await;
    let (status, _) = send(&app, "POST", "/timer/duration", Some(json!({"seconds": 10}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn negative_duration_is_unprocessable() {
    let (app, _) = router();
    let (status, _) = send(&app, "POST", "/timer/duration", Some(json!({"seconds": -5}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn postcode_lookup_without_backend_is_bad_gateway() {
    let (app, _) = router();
    let (status, _) = send(&app, "POST", "/uv/postcode", Some(json!({"postcode": "3000"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert!(body["reading"].is_null());
}

#[tokio::test]
async fn location_lookup_uses_source() {
    let reading = UvReading::new(2.0, false).unwrap();
    let (app, _) = router_with(Arc::new(SimulatedSource::new(reading)));

    let (status, body) = send(&app, "POST", "/uv/location", Some(json!({"lat": -37.8, "lon": 144.9}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"]["severity"], "LOW");
    assert_eq!(body["recommendation"]["interval_seconds"], 7200);

    let (status, _) = send(&app, "POST", "/uv/location", Some(json!({"lat": 120.0, "lon": 0.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn simulate_respects_explicit_sunset() {
    let (app, _) = router();
    let (status, body) = send(&app, "POST", "/uv/simulate", Some(json!({"index": "11", "sunset_imminent": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"]["severity"], "EXTREME");
    assert_eq!(body["recommendation"]["color_hex"], "#9C27B0");

    let (status, body) = send(&app, "POST", "/uv/simulate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reading"]["index"], 0.0);
    assert_eq!(body["recommendation"]["requires_protection"], false);
}

#[tokio::test]
async fn status_reports_timer_and_last_action() {
    let (app, _) = router();
    send(&app, "POST", "/timer/custom", Some(json!({"hours": 1, "minutes": 1}))).await;

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["remaining_seconds"], 3660);
    assert_eq!(body["timer"]["display"], "01:01:00");
    assert_eq!(body["last_action"], "custom");
    assert_eq!(body["port"], 5050);
}

#[tokio::test]
async fn assets_are_served() {
    let (app, _) = router();
    let (status, body) = send(&app, "GET", "/config/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uv_chart"], "/images/state-uvi-chart.png");
}

#[tokio::test]
async fn expiry_events_are_a_stream() {
    let (app, _) = router();
    let request = Request::builder().uri("/timer/events").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
}
