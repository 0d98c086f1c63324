use axum::body::Body;
use axum::http::{Request, StatusCode};
use clap::Parser;
use httpmock::prelude::*;
use std::sync::Arc;
use tower::ServiceExt;
use tube_tutor::server::create_router;
use tube_tutor::{build_bot, BotConfig};

const TOKEN: &str = "99:e2e";

fn config(server: &MockServer) -> BotConfig {
    let base = server.base_url();
    BotConfig::try_parse_from([
        "tube-tutor",
        "--telegram-bot-token",
        TOKEN,
        "--gemini-api-key",
        "gemini-key",
        "--gemini-model",
        "gemini-1.5-flash-8b",
        "--transcript-languages",
        "en",
        "--telegram-api-base",
        base.as_str(),
        "--gemini-api-base",
        base.as_str(),
        "--youtube-base",
        base.as_str(),
        "--request-timeout-secs",
        "5",
    ])
    .unwrap()
}

fn sent(message_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "result": {"message_id": message_id, "date": 0, "chat": {"id": 5, "type": "private"}, "text": text}
    })
}

#[tokio::test]
async fn test_video_link_produces_tutorial_reply() {
    let server = MockServer::start_async().await;
    let base = server.base_url();

    let status = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/bot{}/sendMessage", TOKEN))
                .body_contains("Processing your request");
            then.status(200).json_body(sent(900, "Processing"));
        })
        .await;

    let watch = server
        .mock_async(|when, then| {
            when.method(GET).path("/watch").query_param("v", "vid1");
            then.status(200).body(format!(
                r#"<script>var ytInitialPlayerResponse = {{"playabilityStatus":{{"status":"OK"}},"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{}/api/timedtext?v=vid1&lang=en","languageCode":"en","kind":"asr"}}]}}}}}};</script>"#,
                base
            ));
        })
        .await;

    let timedtext = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/timedtext").query_param("v", "vid1");
            then.status(200).body(
                r#"<transcript><text start="0" dur="1">borrow checker basics</text></transcript>"#,
            );
        })
        .await;

    let gemini = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-flash-8b:generateContent")
                .header("x-goog-api-key", "gemini-key")
                .body_contains("Transcript: borrow checker basics");
            then.status(200).json_body(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Step 1: borrow."}]}, "finishReason": "STOP"}]
            }));
        })
        .await;

    let delete = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/bot{}/deleteMessage", TOKEN))
                .body_contains("\"message_id\":900");
            then.status(200)
                .json_body(serde_json::json!({"ok": true, "result": true}));
        })
        .await;

    let tutorial = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/bot{}/sendMessage", TOKEN))
                .body_contains("Step 1: borrow.");
            then.status(200).json_body(sent(901, "Step 1: borrow."));
        })
        .await;

    let (_telegram, bot) = build_bot(&config(&server)).unwrap();
    let app = create_router(Arc::new(bot));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhook")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "update_id": 1000,
                        "message": {
                            "message_id": 3,
                            "date": 0,
                            "chat": {"id": 5, "type": "private"},
                            "text": "https://youtu.be/vid1"
                        }
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    status.assert_async().await;
    watch.assert_async().await;
    timedtext.assert_async().await;
    gemini.assert_async().await;
    delete.assert_async().await;
    tutorial.assert_async().await;
}

#[tokio::test]
async fn test_start_command_gets_welcome() {
    let server = MockServer::start_async().await;

    let welcome = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/bot{}/sendMessage", TOKEN))
                .body_contains("I create tutorials from YouTube videos");
            then.status(200).json_body(sent(10, "Welcome"));
        })
        .await;

    let (_telegram, bot) = build_bot(&config(&server)).unwrap();
    let app = create_router(Arc::new(bot));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhook")
                .body(Body::from(
                    r#"{"update_id": 1, "message": {"message_id": 1, "date": 0, "chat": {"id": 5, "type": "private"}, "text": "/start", "entities": [{"type": "bot_command", "offset": 0, "length": 6}]}}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    welcome.assert_async().await;
}
