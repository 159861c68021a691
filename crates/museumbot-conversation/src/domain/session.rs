//! Session and booking draft model.

use chrono::NaiveDate;
use museumbot_core::venue::{Price, Venue};

use super::state::ConversationState;

/// Number of tickets in a booking, guaranteed to be in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TicketCount(u8);

impl TicketCount {
    /// Smallest accepted count.
    pub const MIN: u8 = 1;
    /// Largest accepted count per booking.
    pub const MAX: u8 = 10;

    /// Returns `None` when `count` is outside `[MIN, MAX]`.
    #[must_use]
    pub const fn new(count: u8) -> Option<Self> {
        if count >= Self::MIN && count <= Self::MAX {
            Some(Self(count))
        } else {
            None
        }
    }

    /// Returns the count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Booking fields gathered so far. Each field is written once, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Chosen venue.
    pub venue: Option<Venue>,
    /// Chosen visit date.
    pub date: Option<NaiveDate>,
    /// Chosen number of tickets.
    pub ticket_count: Option<TicketCount>,
}

impl Selection {
    /// Starts a draft with only the venue filled in.
    #[must_use]
    pub fn with_venue(venue: Venue) -> Self {
        Self {
            venue: Some(venue),
            ..Self::default()
        }
    }

    /// Returns the draft when every field is present.
    #[must_use]
    pub fn complete(&self) -> Option<BookingDraft> {
        Some(BookingDraft {
            venue: self.venue.clone()?,
            date: self.date?,
            ticket_count: self.ticket_count?,
        })
    }
}

/// A fully populated booking awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// The venue.
    pub venue: Venue,
    /// The visit date.
    pub date: NaiveDate,
    /// Number of tickets.
    pub ticket_count: TicketCount,
}

impl BookingDraft {
    /// Ticket price multiplied by the ticket count.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.venue.ticket_price.times(self.ticket_count.get())
    }
}

/// One identity's conversation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Current state.
    pub state: ConversationState,
    /// Draft under construction, absent until the first venue is chosen.
    pub selection: Option<Selection>,
}

impl Session {
    /// Builds a session, discarding the selection when `state` is idle.
    #[must_use]
    pub fn new(state: ConversationState, selection: Option<Selection>) -> Self {
        let selection = match state {
            ConversationState::Idle => None,
            _ => selection,
        };
        Self { state, selection }
    }

    /// Returns the venue chosen so far, if any.
    #[must_use]
    pub fn venue(&self) -> Option<&Venue> {
        self.selection.as_ref()?.venue.as_ref()
    }
}
