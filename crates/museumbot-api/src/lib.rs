//! Museumbot API — HTTP transport for the booking conversation.
//!
//! Accepts one text message per request, applies per-identity rate limiting,
//! and hands the message to the conversation dispatcher.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::AppError;

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;

/// Builds the application router. `main.rs` adds the HTTP layers on top.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::messages::router())
        .with_state(app_state)
}

/// Builds the CORS layer for `origins`. An empty list allows any origin.
///
/// # Errors
///
/// Returns `AppError::Config` if an origin is not a valid header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| AppError::Config(format!("invalid CORS origin {origin:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}
