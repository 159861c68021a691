//! Liveness endpoint reporting the storage mode and conversation load.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::{AppState, StorageMode};

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Storage backing venues and bookings.
    pub storage: StorageMode,
    /// Identities currently part-way through a booking.
    pub active_conversations: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
        active_conversations: state.dispatcher.store().len(),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
