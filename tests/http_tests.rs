//! HTTP tests - drive the full router (auth gate, dispatch, store)
//!
//! Run with: cargo test --test http_tests

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use wellness::auth::BearerGate;
use wellness::config::ServerConfig;
use wellness::mcp::WellnessHandler;
use wellness::server::{AppState, WellnessServer, CALLER_ID_HEADER};
use wellness::storage::queries::{count_progress, list_reminders};
use wellness::storage::Storage;
use wellness::tips::TIP_NOT_FOUND;

const TOKEN: &str = "test-token";
const IDENTITY: &str = "919876543210";

fn app() -> (Router, Storage) {
    let config = ServerConfig::for_test(TOKEN, IDENTITY);
    let storage = Storage::open(config.storage.clone()).unwrap();
    let router = WellnessServer::new(&config, storage.clone()).into_router();
    (router, storage)
}

fn rpc(id: i64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    rpc(id, "tools/call", json!({"name": name, "arguments": arguments}))
}

fn post(body: &Value, token: Option<&str>, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    if let Some(user) = user {
        builder = builder.header(CALLER_ID_HEADER, user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn tool_text(body: &Value) -> &str {
    body["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn health_bypasses_auth() {
    let (app, _) = app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn missing_or_wrong_token_is_rejected() {
    let (app, _) = app();
    let body = tool_call(1, "validate", json!({}));

    let (status, resp) = send(&app, post(&body, None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp, json!({"detail": "Invalid token"}));

    let (status, _) = send(&app, post(&body, Some("wrong"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejected_request_never_reaches_handler() {
    let (app, storage) = app();
    let body = tool_call(
        1,
        "set_reminder",
        json!({"reminder_type": "hydration", "reminder_time": "hourly"}),
    );

    let (status, _) = send(&app, post(&body, Some("wrong"), Some("u1"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let rows = storage
        .with_connection(|conn| list_reminders(conn, "u1"))
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn validate_returns_identity() {
    let (app, _) = app();
    let body = tool_call(1, "validate", json!({}));

    let (status, resp) = send(&app, post(&body, Some(TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["id"], json!(1));
    assert_eq!(tool_text(&resp), IDENTITY);
}

#[tokio::test]
async fn reminders_upsert_and_list() {
    let (app, storage) = app();

    for (id, time) in [(1, "every 2 hours"), (2, "every 3 hours")] {
        let body = tool_call(
            id,
            "set_reminder",
            json!({"reminder_type": "hydration", "reminder_time": time}),
        );
        let (status, resp) = send(&app, post(&body, Some(TOKEN), Some("u1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            tool_text(&resp),
            format!("Reminder set for hydration at {}!", time)
        );
    }

    let rows = storage
        .with_connection(|conn| list_reminders(conn, "u1"))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reminder_time, "every 3 hours");

    let body = tool_call(3, "get_reminders", json!({}));
    let (status, resp) = send(&app, post(&body, Some(TOKEN), Some("u1"))).await;
    assert_eq!(status, StatusCode::OK);
    let text = tool_text(&resp);
    assert!(text.starts_with("Your reminders:\n- hydration at every 3 hours (set on "));
    assert!(text.ends_with("You've been on track for 0 days!"));
    assert_eq!(text.lines().count(), 3);
}

#[tokio::test]
async fn get_reminders_for_new_user() {
    let (app, _) = app();
    let body = tool_call(1, "get_reminders", json!({}));

    let (status, resp) = send(&app, post(&body, Some(TOKEN), Some("nobody"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        tool_text(&resp),
        "No active reminders. Set one with 'set_reminder'!"
    );
}

#[tokio::test]
async fn track_progress_appends_rows() {
    let (app, storage) = app();
    let body = tool_call(1, "track_progress", json!({"category": "steps", "value": 500}));

    for _ in 0..2 {
        let (status, resp) = send(&app, post(&body, Some(TOKEN), Some("u1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tool_text(&resp), "Progress updated: 500 for steps. Great job!");
    }

    let count = storage
        .with_connection(|conn| count_progress(conn, "u1", "steps"))
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn missing_identity_is_client_error_without_write() {
    let (app, storage) = app();

    let calls = [
        tool_call(
            1,
            "set_reminder",
            json!({"reminder_type": "hydration", "reminder_time": "hourly"}),
        ),
        tool_call(2, "get_reminders", json!({})),
        tool_call(3, "track_progress", json!({"category": "steps", "value": 10})),
    ];

    for body in &calls {
        let (status, resp) = send(&app, post(body, Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["id"], body["id"]);
        assert_eq!(resp["error"]["code"], json!(-32602));
        assert_eq!(resp["error"]["message"], json!("puch_user_id required"));
    }

    let (reminders, progress): (i64, i64) = storage
        .with_connection(|conn| {
            let r: i64 = conn.query_row("SELECT COUNT(*) FROM reminders", [], |row| row.get(0))?;
            let p: i64 = conn.query_row("SELECT COUNT(*) FROM progress", [], |row| row.get(0))?;
            Ok((r, p))
        })
        .unwrap();
    assert_eq!(reminders, 0);
    assert_eq!(progress, 0);
}

#[tokio::test]
async fn wellness_tips() {
    let (app, _) = app();

    let body = tool_call(1, "get_wellness_tip", json!({"category": "nutrition"}));
    let (status, resp) = send(&app, post(&body, Some(TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(tool_text(&resp).starts_with("Eat balanced meals"));

    let body = tool_call(2, "get_wellness_tip", json!({"category": "unknown"}));
    let (_, resp) = send(&app, post(&body, Some(TOKEN), None)).await;
    assert_eq!(tool_text(&resp), TIP_NOT_FOUND);
}

#[tokio::test]
async fn invalid_arguments_are_rejected() {
    let (app, _) = app();
    let body = tool_call(1, "track_progress", json!({"category": "steps", "value": "lots"}));

    let (status, resp) = send(&app, post(&body, Some(TOKEN), Some("u1"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn protocol_methods() {
    let (app, _) = app();

    let (status, resp) = send(
        &app,
        post(&rpc(1, "initialize", json!({})), Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["result"]["serverInfo"]["name"], "Health Wellness Bot");

    let (_, resp) = send(
        &app,
        post(&rpc(2, "tools/list", json!({})), Some(TOKEN), None),
    )
    .await;
    assert_eq!(resp["result"]["tools"].as_array().unwrap().len(), 5);

    let (_, resp) = send(
        &app,
        post(&rpc(3, "prompts/list", json!({})), Some(TOKEN), None),
    )
    .await;
    assert_eq!(resp["error"]["code"], json!(-32601));
}

#[tokio::test]
async fn notifications_get_no_body() {
    let (app, _) = app();
    let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});

    let (status, resp) = send(&app, post(&body, Some(TOKEN), None)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(resp, Value::Null);
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let (app, _) = app();
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from("{not json"))
        .unwrap();

    let (status, resp) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"]["code"], json!(-32700));
}

#[tokio::test]
async fn custom_gate_prefix() {
    let storage = Storage::open_in_memory().unwrap();
    let handler = WellnessHandler::new(storage, IDENTITY);
    let state = AppState::new(handler, BearerGate::new("other-token"));
    let app = WellnessServer::router(state);

    let body = tool_call(1, "validate", json!({}));
    let (status, _) = send(&app, post(&body, Some(TOKEN), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, resp) = send(&app, post(&body, Some("other-token"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tool_text(&resp), IDENTITY);
}
