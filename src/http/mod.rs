//! Axum HTTP surface.
//!
//! ## URL layout
//!
//! ```text
//! POST /bfhl     — single-key dispatch
//! GET  /health   — liveness + official email
//! *              — 404 envelope ("Route not found: <METHOD> <path>")
//! ```
//!
//! [`serve`] drives the axum event loop; the [`CancellationToken`] is wired
//! to axum's graceful shutdown.

mod api;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::bfhl::{Dispatcher, ResponseEnvelope};
use crate::error::{ApiError, AppError};

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — the dispatcher is reference-counted.
#[derive(Clone)]
pub struct HttpState {
    pub dispatcher: Arc<Dispatcher>,
}

// ── Error mapping ─────────────────────────────────────────────────────────────

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(%detail, "request failed with internal error");
        }
        (self.status(), Json(ResponseEnvelope::failure(self.to_string()))).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Every known path also falls back to the 404 envelope for other methods,
/// so `GET /bfhl` reads the same as an unknown path.
pub fn build_router(state: HttpState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/bfhl", post(api::bfhl).fallback(api::not_found))
        .route("/health", get(api::health).fallback(api::not_found))
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .with_state(state)
}

// ── Server loop ───────────────────────────────────────────────────────────────

pub async fn serve(bind_addr: &str, router: Router, shutdown: CancellationToken) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!("http server shut down");
    Ok(())
}
