//! Inbound message endpoint: the transport boundary of the conversation.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use museumbot_core::booking::Identity;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::rate_limit::RATE_LIMITED_REPLY;
use crate::state::AppState;

/// Prefix of administrative chat commands.
const ADMIN_PREFIX: &str = "/admin";

/// Reply to administrative commands, which this service does not handle.
pub const ADMIN_UNAVAILABLE_REPLY: &str = "You don't have admin privileges.";

/// Request body for POST /messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Stable key of the conversation, e.g. a chat id.
    pub identity: String,
    /// Raw message text.
    pub text: String,
}

/// Response body for POST /messages.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Text to deliver back to the sender.
    pub reply: String,
}

/// POST /messages
#[instrument(
    skip(state, request),
    fields(identity = %request.identity, correlation_id = tracing::field::Empty)
)]
async fn receive_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    tracing::Span::current().record("correlation_id", tracing::field::display(correlation_id));

    let key = request.identity.trim();
    if key.is_empty() {
        return Err(ApiError::Validation("identity must not be empty".to_owned()));
    }
    let identity = Identity::new(key);

    if !state.rate_limiter.check(&identity) {
        warn!("rate limit exceeded");
        return Ok(Json(MessageResponse {
            reply: RATE_LIMITED_REPLY.to_owned(),
        }));
    }

    if request.text.trim_start().starts_with(ADMIN_PREFIX) {
        warn!("administrative command refused");
        return Ok(Json(MessageResponse {
            reply: ADMIN_UNAVAILABLE_REPLY.to_owned(),
        }));
    }

    info!("handling inbound message");
    let reply = state.dispatcher.handle(&request.text, &identity).await;

    Ok(Json(MessageResponse { reply }))
}

/// Returns the router for the messaging endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", post(receive_message))
}
