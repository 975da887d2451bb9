use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use focus_board::{create_router, AppState};
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
    (Arc::clone(&state), create_router(state))
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (_, app) = app();
    let (status, body) = send(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_board_starts_idle() {
    let (_, app) = app();
    let (status, body) = send(&app, "GET", "/board").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["header"]["label"], "0/18");
    assert_eq!(body["indicator"]["visible"], false);
    assert_eq!(body["sections"].as_array().unwrap().len(), 3);
    assert_eq!(body["sections"][2]["title"], "Planchas");
    assert_eq!(body["sections"][0]["tiles"][0]["state"], "idle");
    assert_eq!(body["sections"][0]["tiles"][0]["startable"], true);
}

#[tokio::test]
async fn test_start_then_ignored_start() {
    let (state, app) = app();

    let (status, body) = send(&app, "POST", "/timers/3%20Min-a-0/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["board"]["active_id"], "3 Min-a-0");
    assert_eq!(body["board"]["sections"][0]["tiles"][0]["countdown"]["remaining"], "3:00");
    assert_eq!(body["board"]["sections"][0]["tiles"][0]["countdown"]["phase_label"], "Active");

    let (status, body) = send(&app, "POST", "/timers/3%20Min-b-1/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["board"]["active_id"], "3 Min-a-0");
    assert_eq!(body["board"]["sections"][1]["tiles"][1]["state"], "disabled");

    state.shutdown().unwrap();
}

#[tokio::test]
async fn test_unknown_timer_is_not_found() {
    let (state, app) = app();
    let (status, _) = send(&app, "POST", "/timers/missing/start").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!state.get_session().unwrap().is_busy());
}

#[tokio::test]
async fn test_status_reports_active_timer() {
    let (state, app) = app();
    send(&app, "POST", "/timers/1%20Min-2/start").await;

    let (status, body) = send(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"]["id"], "1 Min-2");
    assert_eq!(body["active"]["phase"], "primary");
    assert_eq!(body["active"]["seconds_left"], 60);
    assert_eq!(body["completed"], 0);
    assert_eq!(body["remaining"], 18);
    assert_eq!(body["total"], 18);
    assert_eq!(body["last_action"], "start");

    state.shutdown().unwrap();
}

#[tokio::test]
async fn test_reset_restores_board() {
    let (state, app) = app();
    send(&app, "POST", "/timers/3%20Min-a-0/start").await;
    state.complete_timer("3 Min-a-0").unwrap();

    let (_, body) = send(&app, "GET", "/board").await;
    assert_eq!(body["header"]["label"], "1/18");

    let (status, body) = send(&app, "POST", "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "reset");
    assert_eq!(body["board"]["header"]["label"], "0/18");
    assert_eq!(body["board"]["active_id"], Value::Null);
}

#[tokio::test]
async fn test_events_stream_opens_with_current_board() {
    let (_, app) = app();
    let request = Request::builder()
        .method("GET")
        .uri("/events")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let mut body = response.into_body().into_data_stream();
    let frame = body.next().await.unwrap().unwrap();
    let frame = String::from_utf8(frame.to_vec()).unwrap();

    assert!(frame.starts_with("event: board\n"));
    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();
    let board: Value = serde_json::from_str(data).unwrap();
    assert_eq!(board["header"]["label"], "0/18");
    assert_eq!(board["active_id"], Value::Null);
}
