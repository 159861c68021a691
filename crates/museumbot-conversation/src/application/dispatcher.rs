//! Routes each message to the handler for the sender's current state.

use std::sync::Arc;

use museumbot_core::booking::Identity;
use tracing::{debug, error, info, instrument};

use super::handlers::{self, Collaborators, Transition};
use super::session_store::SessionStore;
use crate::domain::prompts;
use crate::domain::sanitize::{SanitizedMessage, sanitize};
use crate::domain::session::Session;
use crate::domain::state::ConversationState;
use crate::error::ConversationError;

/// Entry point for the transport: one call per inbound message.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<SessionStore>,
    collaborators: Collaborators,
}

impl Dispatcher {
    /// Creates a dispatcher over `store`.
    #[must_use]
    pub fn new(store: Arc<SessionStore>, collaborators: Collaborators) -> Self {
        Self {
            store,
            collaborators,
        }
    }

    /// The session store this dispatcher writes to.
    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Handles one message from `identity` and returns the reply.
    ///
    /// Messages from the same identity are processed one at a time in arrival
    /// order. Any failure inside a handler resets the session to idle and
    /// yields a generic apology; the reply is never empty.
    #[instrument(skip(self, raw_message, identity), fields(identity = %identity))]
    pub async fn handle(&self, raw_message: &str, identity: &Identity) -> String {
        let mut guard = self.store.lock(identity).await;
        let session = guard.session().clone();
        let message = sanitize(raw_message);
        debug!(state = %session.state, message = message.text(), "dispatching message");

        let reply = match self.route(&message, &session, identity).await {
            Ok(transition) => {
                let next = transition.session();
                if next.state != session.state {
                    info!(from = %session.state, to = %next.state, "conversation state changed");
                }
                guard.set(next);
                transition.reply
            }
            Err(err) => {
                error!(state = %session.state, error = %err, "conversation turn failed, resetting session");
                guard.clear();
                prompts::APOLOGY.to_owned()
            }
        };
        self.store.release(guard);

        if reply.trim().is_empty() {
            prompts::NOT_UNDERSTOOD.to_owned()
        } else {
            reply
        }
    }

    async fn route(
        &self,
        message: &SanitizedMessage,
        session: &Session,
        identity: &Identity,
    ) -> Result<Transition, ConversationError> {
        let ctx = &self.collaborators;
        match session.state {
            ConversationState::Idle => handlers::handle_idle(message, session, ctx).await,
            ConversationState::SelectingVenue => {
                handlers::handle_selecting_venue(message, session, ctx).await
            }
            ConversationState::SelectingDate => {
                handlers::handle_selecting_date(message, session, ctx)
            }
            ConversationState::SelectingTickets => {
                handlers::handle_selecting_tickets(message, session)
            }
            ConversationState::Confirming => {
                handlers::handle_confirming(message, session, identity, ctx).await
            }
            ConversationState::Cancelling => Ok(handlers::handle_cancelling(message, session)),
            ConversationState::Modifying => Ok(handlers::handle_modifying(message, session)),
        }
    }
}
