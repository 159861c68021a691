//! Errors that end a conversation turn.

use museumbot_core::error::CollaboratorError;
use thiserror::Error;

use crate::domain::state::ConversationState;

/// A failure that cannot be recovered within the current turn.
///
/// Bad user input never produces this type; handlers answer it with a
/// re-prompt. Anything that does escape a handler makes the dispatcher reset
/// the session and reply with a generic apology.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// A venue directory or booking sink call failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// The session reached a state without the selection fields that state
    /// depends on.
    #[error("session in state {state} is missing its {field}")]
    IncompleteSelection {
        /// The state being handled.
        state: ConversationState,
        /// The missing selection field.
        field: &'static str,
    },
}

impl ConversationError {
    pub(crate) fn missing(state: ConversationState, field: &'static str) -> Self {
        Self::IncompleteSelection { state, field }
    }
}
