//! Conversation states.

use std::fmt;

/// Position of a session in the booking conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversationState {
    /// No booking in progress.
    #[default]
    Idle,
    /// Venues have been listed; waiting for a 1-based index.
    SelectingVenue,
    /// Venue chosen; waiting for a visit date.
    SelectingDate,
    /// Date chosen; waiting for a ticket count.
    SelectingTickets,
    /// Draft complete; waiting for yes/no.
    Confirming,
    /// Placeholder for cancelling an existing booking.
    Cancelling,
    /// Placeholder for modifying an existing booking.
    Modifying,
}

impl ConversationState {
    /// Every state, in happy-path order followed by the placeholders.
    pub const ALL: [Self; 7] = [
        Self::Idle,
        Self::SelectingVenue,
        Self::SelectingDate,
        Self::SelectingTickets,
        Self::Confirming,
        Self::Cancelling,
        Self::Modifying,
    ];

    /// Upper snake case name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::SelectingVenue => "SELECTING_VENUE",
            Self::SelectingDate => "SELECTING_DATE",
            Self::SelectingTickets => "SELECTING_TICKETS",
            Self::Confirming => "CONFIRMING",
            Self::Cancelling => "CANCELLING",
            Self::Modifying => "MODIFYING",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
