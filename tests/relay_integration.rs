//! End-to-end relay tests against mock options and webhook servers.
//!
//! Drives the real router and the `reqwest` transport; `wiremock` stands in
//! for the options host and the Discord webhook.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dex_relay_service::config::Settings;
use dex_relay_service::dex::MemoryDex;
use dex_relay_service::relay::create_transport;
use dex_relay_service::server::{create_app, AppState};

fn app() -> Router {
    app_with(Settings::default())
}

fn app_with(settings: Settings) -> Router {
    let transport = create_transport(&settings.relay).unwrap();
    let dex = Arc::new(MemoryDex::embedded().unwrap());
    create_app(AppState::with_components(settings, dex, transport))
}

async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
    get_from(app(), uri).await
}

async fn get_from(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn serve_options(server: &MockServer, options: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/options.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(options.to_string()))
        .mount(server)
        .await;
}

fn relay_uri(server: &MockServer, query: &str) -> String {
    format!(
        "/discord?output={0}/options.json&webhook={0}/webhook&{1}",
        server.uri(),
        query
    )
}

#[tokio::test]
async fn test_matching_message_is_forwarded() {
    let server = MockServer::start().await;
    serve_options(
        &server,
        json!({
            "msg_pattern": "^(\\d{4})$",
            "discord_user": "{user} ({level})",
            "discord_msg": "code {match.1}",
            "twitch_reply": "sent {user}"
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(body_json(json!({
            "username": "Bob (moderator)",
            "content": "code 1234",
            "wait": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, content_type, body) =
        get(&relay_uri(&server, "msg=1234&user=Bob&level=moderator")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(body, "sent Bob");
}

#[tokio::test]
async fn test_mismatching_message_is_not_forwarded() {
    let server = MockServer::start().await;
    serve_options(
        &server,
        json!({
            "msg_pattern": "^FC:\\d+$",
            "twitch_reply_invalid_msg": "bad {user}"
        }),
    )
    .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_, _, body) = get(&relay_uri(&server, "msg=hello%20there&user=Bob")).await;
    assert_eq!(body, "bad Bob");
}

#[tokio::test]
async fn test_empty_message_reply() {
    let server = MockServer::start().await;
    serve_options(&server, json!({"twitch_reply_empty_msg": "Hi {user}"})).await;

    let (_, _, body) = get(&relay_uri(&server, "msg=&user=Bob")).await;
    assert_eq!(body, "Hi Bob");
}

#[tokio::test]
async fn test_webhook_error_is_reported_in_chat() {
    let server = MockServer::start().await;
    serve_options(&server, json!({"twitch_reply": "sent"})).await;

    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = get(&relay_uri(&server, "msg=hi&user=Bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Discord API returned an error! (HTTP status 500)");
}

#[tokio::test]
async fn test_error_reply_uses_configured_length() {
    let mut settings = Settings::default();
    settings.relay.max_reply_length = 20;

    let (status, _, body) = get_from(app_with(settings), "/discord?msg=hi&user=Bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.chars().count(), 20);
    assert!(body.starts_with("Error! Please"));
    assert!(body.ends_with('…'));
}

#[tokio::test]
async fn test_options_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/options.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (_, _, body) = get(&relay_uri(&server, "msg=hi")).await;
    assert_eq!(body, "ERROR! Request to 'options' url failed! (HTTP status 404)");
}

#[tokio::test]
async fn test_options_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/options.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let (_, _, body) = get(&relay_uri(&server, "msg=hi")).await;
    assert!(body.starts_with("ERROR! 'options' url contains an invalid JSON! ("));
}

#[tokio::test]
async fn test_missing_parameter() {
    let (status, _, body) = get("/discord?msg=hi&user=Bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Error! Please provide an 'output' parameter!");

    let (_, _, body) = get("/discord?output=https://example.com/o.json&msg=hi").await;
    assert_eq!(body, "Error! Please provide an 'webhook' parameter!");
}

#[tokio::test]
async fn test_help_page_without_parameters() {
    let (status, content_type, body) = get("/discord").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert!(body.contains("msg_pattern"));
    assert!(body.contains("twitch_reply_empty_msg"));
}

#[tokio::test]
async fn test_health_and_metrics() {
    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert!(health["timestamp"].is_string());

    let (status, _, _) = get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
}
