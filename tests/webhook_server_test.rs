use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tube_tutor::core::UpdateHandler;
use tube_tutor::domain::model::Update;
use tube_tutor::server::create_router;
use tube_tutor::{BotError, Result};

#[derive(Default)]
struct RecordingHandler {
    seen: Mutex<Vec<i64>>,
    fail: bool,
}

#[async_trait]
impl UpdateHandler for RecordingHandler {
    async fn handle_update(&self, update: Update) -> Result<()> {
        self.seen.lock().unwrap().push(update.update_id);
        if self.fail {
            return Err(BotError::GenerationError {
                message: "boom".to_string(),
            });
        }
        Ok(())
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_update(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_reports_running() {
    let app = create_router(Arc::new(RecordingHandler::default()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"status": "Bot webhook is running"})
    );
}

#[tokio::test]
async fn test_webhook_health_check() {
    let app = create_router(Arc::new(RecordingHandler::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/webhook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_update_is_dispatched() {
    let handler = Arc::new(RecordingHandler::default());
    let app = create_router(handler.clone());

    let response = app
        .oneshot(post_update(
            r#"{"update_id": 501, "message": {"message_id": 1, "date": 0, "chat": {"id": 5, "type": "private"}, "text": "/start"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
    assert_eq!(*handler.seen.lock().unwrap(), vec![501]);
}

#[tokio::test]
async fn test_handler_error_still_returns_ok() {
    let handler = Arc::new(RecordingHandler {
        fail: true,
        ..RecordingHandler::default()
    });
    let app = create_router(handler.clone());

    let response = app
        .oneshot(post_update(r#"{"update_id": 7}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*handler.seen.lock().unwrap(), vec![7]);
}

#[tokio::test]
async fn test_malformed_payload_returns_ok_without_dispatch() {
    let handler = Arc::new(RecordingHandler::default());
    let app = create_router(handler.clone());

    for body in ["not json", r#"{"message": {}}"#, ""] {
        let response = app.clone().oneshot(post_update(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "body: {:?}", body);
    }

    assert!(handler.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_router(Arc::new(RecordingHandler::default()));

    let response = app
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
