use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::model::Update;
use crate::domain::ports::UpdateHandler;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Bot webhook is running",
    })
}

pub async fn webhook_status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Always answers 200 so Telegram does not redeliver a failing update.
pub async fn receive_update<H>(State(handler): State<Arc<H>>, body: Bytes) -> StatusCode
where
    H: UpdateHandler + 'static,
{
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            error!("Error processing webhook: invalid update payload: {}", e);
            return StatusCode::OK;
        }
    };

    let update_id = update.update_id;
    debug!("Processing update {}", update_id);

    if let Err(e) = handler.handle_update(update).await {
        error!("Error processing webhook update {}: {}", update_id, e);
    }

    StatusCode::OK
}
