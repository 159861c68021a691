//! Per-identity sliding-window rate limiting.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use museumbot_core::booking::Identity;
use museumbot_core::clock::Clock;

/// Reply sent instead of a conversation turn when an identity is over its
/// limit.
pub const RATE_LIMITED_REPLY: &str = "You're sending messages too quickly. Please wait a moment.";

/// Allows at most `max_messages` accepted messages per identity within any
/// `window`. Rejected messages do not count against the limit.
pub struct RateLimiter {
    max_messages: usize,
    window: TimeDelta,
    clock: Arc<dyn Clock>,
    history: Mutex<HashMap<Identity, VecDeque<DateTime<Utc>>>>,
}

impl RateLimiter {
    /// Creates a limiter.
    #[must_use]
    pub fn new(max_messages: usize, window: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_messages,
            window,
            clock,
            history: Mutex::new(HashMap::new()),
        }
    }

    /// Records a message from `identity` and returns whether it may proceed.
    ///
    /// Identities whose window has emptied out are forgotten, so only senders
    /// active within the last window are tracked.
    pub fn check(&self, identity: &Identity) -> bool {
        let now = self.clock.now();
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.retain(|_, recent| {
            while recent
                .front()
                .is_some_and(|sent| now - *sent >= self.window)
            {
                recent.pop_front();
            }
            !recent.is_empty()
        });

        if self.max_messages == 0 {
            return false;
        }
        let recent = history.entry(identity.clone()).or_default();
        if recent.len() >= self.max_messages {
            return false;
        }
        recent.push_back(now);
        true
    }

    /// Number of identities with messages inside the current window.
    #[must_use]
    pub fn tracked_identities(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_messages", &self.max_messages)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
