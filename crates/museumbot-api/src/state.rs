//! Shared application state.

use std::sync::Arc;

use museumbot_conversation::application::dispatcher::Dispatcher;
use serde::Serialize;

use crate::rate_limit::RateLimiter;

/// Where venues and bookings are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// PostgreSQL, selected by `DATABASE_URL`.
    Postgres,
    /// Process memory; bookings are lost on restart.
    InMemory,
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Conversation entry point.
    pub dispatcher: Arc<Dispatcher>,
    /// Per-identity inbound message limiter.
    pub rate_limiter: Arc<RateLimiter>,
    /// Storage backing the venue directory and booking sink.
    pub storage: StorageMode,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, rate_limiter: RateLimiter, storage: StorageMode) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            rate_limiter: Arc::new(rate_limiter),
            storage,
        }
    }
}
