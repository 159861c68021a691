//! Process-wide session storage with per-identity critical sections.
//!
//! Each identity owns a slot guarded by its own async mutex. The map of slots
//! sits behind a short synchronous lock that is only held to find or create a
//! slot, never across an `.await`, so a slow turn for one identity does not
//! hold up any other identity.
//!
//! An idle session with no selection is indistinguishable from a missing one,
//! so slots are evicted when released idle and nobody else is waiting on
//! them. Only conversations in progress occupy memory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use museumbot_core::booking::Identity;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::session::Session;
use crate::domain::state::ConversationState;

type Slot = Arc<AsyncMutex<Session>>;

/// Mapping from identity to session.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<Identity, Slot>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, identity: &Identity) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(identity.clone()).or_default())
    }

    /// Waits for exclusive access to `identity`'s session, creating a default
    /// idle session on first contact.
    ///
    /// Guards for the same identity are handed out in request order; guards
    /// for different identities never wait on each other.
    pub async fn lock(&self, identity: &Identity) -> SessionGuard {
        let slot = self.slot(identity);
        SessionGuard {
            identity: identity.clone(),
            session: slot.lock_owned().await,
        }
    }

    /// Ends a turn. When the session is idle and no other turn is waiting on
    /// the same identity, the slot is removed from the store.
    pub fn release(&self, guard: SessionGuard) {
        if guard.session().state != ConversationState::Idle {
            return;
        }
        let SessionGuard { identity, session } = guard;
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        drop(session);
        // Waiters clone the slot under the map lock, so a count of one means
        // the map holds the only reference.
        if slots
            .get(&identity)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&identity);
        }
    }

    /// Returns a copy of `identity`'s session.
    pub async fn get(&self, identity: &Identity) -> Session {
        let guard = self.lock(identity).await;
        let session = guard.session().clone();
        self.release(guard);
        session
    }

    /// Replaces `identity`'s session.
    pub async fn set(&self, identity: &Identity, session: Session) {
        let mut guard = self.lock(identity).await;
        guard.set(session);
        self.release(guard);
    }

    /// Resets `identity`'s session to idle with no selection.
    pub async fn clear(&self, identity: &Identity) {
        let mut guard = self.lock(identity).await;
        guard.clear();
        self.release(guard);
    }

    /// Number of identities with a conversation in progress.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no conversation is in progress.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one identity's session. Unlocked on drop; hand it to
/// [`SessionStore::release`] to also evict the slot once it is idle.
#[derive(Debug)]
pub struct SessionGuard {
    identity: Identity,
    session: OwnedMutexGuard<Session>,
}

impl SessionGuard {
    /// The identity this guard belongs to.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the session. An idle session never keeps a selection.
    pub fn set(&mut self, session: Session) {
        *self.session = Session::new(session.state, session.selection);
    }

    /// Resets the session to idle with no selection.
    pub fn clear(&mut self) {
        *self.session = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use museumbot_core::venue::{Price, Venue};
    use tokio::time::timeout;

    use super::*;
    use crate::domain::session::Selection;
    use crate::domain::state::ConversationState;

    fn selecting_date() -> Session {
        Session {
            state: ConversationState::SelectingDate,
            selection: Some(Selection::with_venue(Venue::new(
                "LOUVRE001",
                "The Louvre",
                Price::from_dollars(20),
            ))),
        }
    }

    #[tokio::test]
    async fn test_get_returns_idle_session_on_first_contact() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let session = store.get(&Identity::new("a")).await;

        assert_eq!(session, Session::default());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_only_conversations_in_progress_are_retained() {
        // Arrange
        let store = SessionStore::new();
        let a = Identity::new("a");
        let b = Identity::new("b");

        // Act
        store.set(&a, selecting_date()).await;
        store.set(&b, selecting_date()).await;
        let during = store.len();
        store.clear(&a).await;
        store.set(&b, Session::default()).await;

        // Assert
        assert_eq!(during, 2);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_release_keeps_slot_while_another_turn_waits() {
        let store = Arc::new(SessionStore::new());
        let identity = Identity::new("a");
        let held = store.lock(&identity).await;

        let waiter = {
            let store = Arc::clone(&store);
            let identity = identity.clone();
            tokio::spawn(async move {
                let mut guard = store.lock(&identity).await;
                guard.set(selecting_date());
                store.release(guard);
            })
        };
        tokio::task::yield_now().await;
        store.release(held);
        assert_eq!(store.len(), 1);

        waiter.await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&identity).await, selecting_date());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips_and_clear_resets() {
        let store = SessionStore::new();
        let identity = Identity::new("a");

        store.set(&identity, selecting_date()).await;
        assert_eq!(store.get(&identity).await, selecting_date());

        store.clear(&identity).await;
        assert_eq!(store.get(&identity).await, Session::default());
    }

    #[tokio::test]
    async fn test_setting_idle_drops_selection() {
        let store = SessionStore::new();
        let identity = Identity::new("a");
        let mut session = selecting_date();
        session.state = ConversationState::Idle;

        store.set(&identity, session).await;

        assert!(store.get(&identity).await.selection.is_none());
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let store = SessionStore::new();
        let a = Identity::new("a");
        let b = Identity::new("b");

        store.set(&a, selecting_date()).await;

        assert_eq!(store.get(&b).await, Session::default());
        assert_eq!(store.get(&a).await, selecting_date());
    }

    #[tokio::test]
    async fn test_held_guard_does_not_block_other_identities() {
        let store = SessionStore::new();
        let _held = store.lock(&Identity::new("a")).await;

        let other = timeout(Duration::from_secs(1), store.get(&Identity::new("b"))).await;

        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_held_guard_serializes_same_identity() {
        let store = Arc::new(SessionStore::new());
        let identity = Identity::new("a");
        let mut held = store.lock(&identity).await;

        let waiter = {
            let store = Arc::clone(&store);
            let identity = identity.clone();
            tokio::spawn(async move { store.get(&identity).await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        held.set(selecting_date());
        drop(held);

        assert_eq!(waiter.await.unwrap(), selecting_date());
    }
}
