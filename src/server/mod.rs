//! Webhook HTTP application.
//!
//! Routes:
//! - `GET /` service banner
//! - `POST /api/webhook` Telegram update delivery
//! - `GET /api/webhook` health check
//!
//! Every request passes through the request logger and a tower-http
//! `TraceLayer`. The server shuts down gracefully on CTRL+C or SIGTERM.

pub mod handlers;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::domain::ports::UpdateHandler;

pub const WEBHOOK_PATH: &str = "/api/webhook";

/// Builds the router around a shared update handler.
pub fn create_router<H>(handler: Arc<H>) -> Router
where
    H: UpdateHandler + 'static,
{
    Router::new()
        .route("/", get(handlers::root))
        .route(
            WEBHOOK_PATH,
            get(handlers::webhook_status).post(handlers::receive_update::<H>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_requests))
        .with_state(handler)
}

async fn log_requests(req: Request, next: Next) -> Response {
    info!("Incoming request: {} {}", req.method(), req.uri());

    let response = next.run(req).await;

    if response.status().is_server_error() {
        error!("Request failed with status {}", response.status());
    }
    info!("Response status: {}", response.status().as_u16());

    response
}

/// Serves `handler` on `addr` until a shutdown signal arrives.
pub async fn start_server<H>(handler: Arc<H>, addr: SocketAddr) -> Result<(), std::io::Error>
where
    H: UpdateHandler + 'static,
{
    let app = create_router(handler);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Resolves on CTRL+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
