//! One handler per conversation state.
//!
//! A handler reads the sanitized message and a snapshot of the session and
//! returns a [`Transition`]. Handlers never write to the session store; the
//! dispatcher applies the transition.

use std::sync::Arc;

use museumbot_core::booking::{BookingRecord, Identity, TransactionId};
use museumbot_core::clock::Clock;
use museumbot_core::collaborators::{AvailabilityOracle, BookingSink, VenueDirectory};
use tracing::{debug, info};

use crate::domain::prompts;
use crate::domain::sanitize::SanitizedMessage;
use crate::domain::session::{Selection, Session};
use crate::domain::state::ConversationState;
use crate::domain::validators::{
    InputRejection, normalize_date_input, parse_date, parse_selection, parse_ticket_count,
};
use crate::error::ConversationError;

/// Words that start a booking from the idle state.
const BOOKING_KEYWORDS: [&str; 2] = ["book", "ticket"];

/// The external collaborators a turn may call.
#[derive(Clone)]
pub struct Collaborators {
    /// Venue listing.
    pub venues: Arc<dyn VenueDirectory>,
    /// Date availability.
    pub availability: Arc<dyn AvailabilityOracle>,
    /// Booking persistence.
    pub bookings: Arc<dyn BookingSink>,
    /// Time source for date validation and booking timestamps.
    pub clock: Arc<dyn Clock>,
}

/// Outcome of handling one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State to store.
    pub next_state: ConversationState,
    /// Selection to store. Ignored when `next_state` is idle.
    pub next_selection: Option<Selection>,
    /// Text sent back to the user.
    pub reply: String,
}

impl Transition {
    /// Move to `state` with `selection`.
    #[must_use]
    pub fn to(state: ConversationState, selection: Option<Selection>, reply: impl Into<String>) -> Self {
        Self {
            next_state: state,
            next_selection: selection,
            reply: reply.into(),
        }
    }

    /// Keep the session exactly as it is.
    #[must_use]
    pub fn stay(session: &Session, reply: impl Into<String>) -> Self {
        Self::to(session.state, session.selection.clone(), reply)
    }

    /// Reject the message and re-prompt.
    #[must_use]
    pub fn reject(session: &Session, rejection: InputRejection) -> Self {
        debug!(state = %session.state, %rejection, "input rejected");
        Self::stay(session, rejection.reprompt())
    }

    /// Return to idle, discarding the selection.
    #[must_use]
    pub fn finish(reply: impl Into<String>) -> Self {
        Self::to(ConversationState::Idle, None, reply)
    }

    /// The session this transition leaves behind.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.next_state, self.next_selection.clone())
    }
}

/// IDLE: a message mentioning "book" or "ticket" lists the venues.
///
/// # Errors
///
/// Returns `ConversationError::Collaborator` if the venue directory fails.
pub async fn handle_idle(
    message: &SanitizedMessage,
    _session: &Session,
    ctx: &Collaborators,
) -> Result<Transition, ConversationError> {
    if !message.mentions_any(&BOOKING_KEYWORDS) {
        return Ok(Transition::finish(prompts::GREETING));
    }

    let venues = ctx.venues.list_venues().await?;
    if venues.is_empty() {
        return Ok(Transition::finish(prompts::NO_VENUES));
    }

    Ok(Transition::to(
        ConversationState::SelectingVenue,
        None,
        prompts::venue_list(&venues),
    ))
}

/// SELECTING_VENUE: a 1-based index into a fresh directory listing.
///
/// # Errors
///
/// Returns `ConversationError::Collaborator` if the venue directory fails.
pub async fn handle_selecting_venue(
    message: &SanitizedMessage,
    session: &Session,
    ctx: &Collaborators,
) -> Result<Transition, ConversationError> {
    let venues = ctx.venues.list_venues().await?;
    let index = match parse_selection(message.text(), venues.len()) {
        Ok(index) => index,
        Err(rejection) => return Ok(Transition::reject(session, rejection)),
    };

    let Some(venue) = venues.into_iter().nth(index - 1) else {
        return Ok(Transition::reject(session, InputRejection::InvalidSelection));
    };

    let reply = prompts::date_prompt(&venue);
    Ok(Transition::to(
        ConversationState::SelectingDate,
        Some(Selection::with_venue(venue)),
        reply,
    ))
}

/// SELECTING_DATE: a real, non-past date the venue can take.
///
/// # Errors
///
/// Returns `ConversationError::IncompleteSelection` if no venue was chosen.
pub fn handle_selecting_date(
    message: &SanitizedMessage,
    session: &Session,
    ctx: &Collaborators,
) -> Result<Transition, ConversationError> {
    let state = ConversationState::SelectingDate;
    let mut selection = session
        .selection
        .clone()
        .ok_or_else(|| ConversationError::missing(state, "venue"))?;
    let venue_id = selection
        .venue
        .as_ref()
        .map(|venue| venue.id.clone())
        .ok_or_else(|| ConversationError::missing(state, "venue"))?;

    let input = normalize_date_input(message.text());
    let date = match parse_date(&input, ctx.clock.today()) {
        Ok(date) => date,
        Err(rejection) => return Ok(Transition::reject(session, rejection)),
    };

    if !ctx.availability.is_available(date, &venue_id) {
        return Ok(Transition::reject(session, InputRejection::DateUnavailable));
    }

    selection.date = Some(date);
    Ok(Transition::to(
        ConversationState::SelectingTickets,
        Some(selection),
        prompts::TICKET_COUNT_PROMPT,
    ))
}

/// SELECTING_TICKETS: a count in `[1, 10]`; replies with the total.
///
/// # Errors
///
/// Returns `ConversationError::IncompleteSelection` if the venue or date is
/// missing.
pub fn handle_selecting_tickets(
    message: &SanitizedMessage,
    session: &Session,
) -> Result<Transition, ConversationError> {
    let state = ConversationState::SelectingTickets;
    let count = match parse_ticket_count(message.text()) {
        Ok(count) => count,
        Err(rejection) => return Ok(Transition::reject(session, rejection)),
    };

    let mut selection = session
        .selection
        .clone()
        .ok_or_else(|| ConversationError::missing(state, "venue"))?;
    selection.ticket_count = Some(count);
    let draft = selection
        .complete()
        .ok_or_else(|| ConversationError::missing(state, "date"))?;

    let reply =
        prompts::confirmation_request(&draft.venue, draft.date, count.get(), draft.total_price());
    Ok(Transition::to(
        ConversationState::Confirming,
        Some(selection),
        reply,
    ))
}

/// CONFIRMING: "yes" persists the booking, "no" drops it.
///
/// # Errors
///
/// Returns `ConversationError::Collaborator` if the booking sink fails, or
/// `ConversationError::IncompleteSelection` if the draft is not complete.
pub async fn handle_confirming(
    message: &SanitizedMessage,
    session: &Session,
    identity: &Identity,
    ctx: &Collaborators,
) -> Result<Transition, ConversationError> {
    match message.lowered() {
        "yes" => {}
        "no" => {
            info!(%identity, "booking declined");
            return Ok(Transition::finish(prompts::BOOKING_CANCELLED));
        }
        _ => return Ok(Transition::reject(session, InputRejection::UnclearConfirmation)),
    }

    let draft = session
        .selection
        .as_ref()
        .and_then(Selection::complete)
        .ok_or_else(|| ConversationError::missing(ConversationState::Confirming, "booking draft"))?;

    let booked_at = ctx.clock.now();
    let mut booking = BookingRecord {
        transaction_id: TransactionId::generate(booked_at),
        total_price: draft.total_price(),
        venue: draft.venue,
        date: draft.date,
        ticket_count: draft.ticket_count.get(),
        identity: identity.clone(),
        booked_at,
    };

    booking.transaction_id = ctx.bookings.persist(&booking).await?;
    info!(
        %identity,
        transaction_id = %booking.transaction_id,
        venue = %booking.venue.id,
        date = %booking.date,
        tickets = booking.ticket_count,
        "booking persisted"
    );

    Ok(Transition::finish(prompts::booking_confirmed(&booking)))
}

/// CANCELLING: placeholder, returns to idle.
#[must_use]
pub fn handle_cancelling(_message: &SanitizedMessage, _session: &Session) -> Transition {
    Transition::finish(prompts::CANCELLATION_STUB)
}

/// MODIFYING: placeholder, returns to idle.
#[must_use]
pub fn handle_modifying(_message: &SanitizedMessage, _session: &Session) -> Transition {
    Transition::finish(prompts::MODIFICATION_STUB)
}

#[cfg(test)]
mod tests {
    use chrono::{Days, TimeZone, Utc};
    use museumbot_core::venue::Price;
    use museumbot_test_support::{
        FailingBookingSink, FixedAvailability, FixedClock, RecordingAvailability,
        RecordingBookingSink, StaticVenueDirectory, three_venues,
    };

    use super::*;
    use crate::domain::sanitize::sanitize;
    use crate::domain::session::TicketCount;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap())
    }

    fn ctx_with(
        availability: Arc<dyn AvailabilityOracle>,
        bookings: Arc<dyn BookingSink>,
    ) -> Collaborators {
        Collaborators {
            venues: Arc::new(StaticVenueDirectory(three_venues())),
            availability,
            bookings,
            clock: Arc::new(clock()),
        }
    }

    fn ctx() -> Collaborators {
        ctx_with(
            Arc::new(FixedAvailability(true)),
            Arc::new(RecordingBookingSink::new()),
        )
    }

    fn session_at(state: ConversationState, selection: Selection) -> Session {
        Session {
            state,
            selection: Some(selection),
        }
    }

    fn date_selection() -> Selection {
        Selection::with_venue(three_venues().remove(1))
    }

    fn full_selection() -> Selection {
        let mut selection = date_selection();
        selection.date = clock().today().checked_add_days(Days::new(7));
        selection.ticket_count = TicketCount::new(3);
        selection
    }

    #[tokio::test]
    async fn test_idle_greets_without_booking_keyword() {
        let transition = handle_idle(&sanitize("hello"), &Session::default(), &ctx())
            .await
            .unwrap();

        assert_eq!(transition, Transition::finish(prompts::GREETING));
    }

    #[tokio::test]
    async fn test_idle_lists_venues_on_booking_keyword() {
        let transition = handle_idle(&sanitize("I want TICKETS"), &Session::default(), &ctx())
            .await
            .unwrap();

        assert_eq!(transition.next_state, ConversationState::SelectingVenue);
        assert!(transition.next_selection.is_none());
        assert!(transition.reply.contains("2. Museum of Modern Art - $25"));
    }

    #[tokio::test]
    async fn test_idle_stays_idle_when_directory_is_empty() {
        let mut ctx = ctx();
        ctx.venues = Arc::new(StaticVenueDirectory(Vec::new()));

        let transition = handle_idle(&sanitize("book"), &Session::default(), &ctx)
            .await
            .unwrap();

        assert_eq!(transition, Transition::finish(prompts::NO_VENUES));
    }

    #[tokio::test]
    async fn test_selecting_venue_records_choice() {
        let session = Session::new(ConversationState::SelectingVenue, None);

        let transition = handle_selecting_venue(&sanitize("2"), &session, &ctx())
            .await
            .unwrap();

        assert_eq!(transition.next_state, ConversationState::SelectingDate);
        assert_eq!(transition.session().venue().unwrap().name, "Museum of Modern Art");
        assert!(transition.reply.starts_with("You've selected Museum of Modern Art."));
    }

    #[tokio::test]
    async fn test_selecting_venue_rejects_out_of_range() {
        let session = Session::new(ConversationState::SelectingVenue, None);

        let transition = handle_selecting_venue(&sanitize("99"), &session, &ctx())
            .await
            .unwrap();

        assert_eq!(transition, Transition::stay(&session, prompts::INVALID_SELECTION));
    }

    #[test]
    fn test_selecting_date_accepts_compact_format_and_queries_oracle() {
        let availability = Arc::new(RecordingAvailability::new(vec![true]));
        let ctx = ctx_with(availability.clone(), Arc::new(RecordingBookingSink::new()));
        let session = session_at(ConversationState::SelectingDate, date_selection());
        let date = clock().today().checked_add_days(Days::new(10)).unwrap();

        let transition =
            handle_selecting_date(&sanitize(&date.format("%Y%m%d").to_string()), &session, &ctx)
                .unwrap();

        assert_eq!(transition.next_state, ConversationState::SelectingTickets);
        assert_eq!(transition.next_selection.unwrap().date, Some(date));
        assert_eq!(transition.reply, prompts::TICKET_COUNT_PROMPT);
        let queries = availability.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].0, date);
        assert_eq!(queries[0].1.0, "MOMA002");
    }

    #[test]
    fn test_selecting_date_reprompts_when_unavailable() {
        let ctx = ctx_with(
            Arc::new(FixedAvailability(false)),
            Arc::new(RecordingBookingSink::new()),
        );
        let session = session_at(ConversationState::SelectingDate, date_selection());
        let date = clock().today().to_string();

        let transition = handle_selecting_date(&sanitize(&date), &session, &ctx).unwrap();

        assert_eq!(transition, Transition::stay(&session, prompts::DATE_UNAVAILABLE));
    }

    #[test]
    fn test_selecting_date_rejects_past_date_before_asking_oracle() {
        let availability = Arc::new(RecordingAvailability::new(vec![true]));
        let ctx = ctx_with(availability.clone(), Arc::new(RecordingBookingSink::new()));
        let session = session_at(ConversationState::SelectingDate, date_selection());
        let yesterday = clock().today().pred_opt().unwrap().to_string();

        let transition = handle_selecting_date(&sanitize(&yesterday), &session, &ctx).unwrap();

        assert_eq!(transition.reply, prompts::INVALID_DATE);
        assert!(availability.queries().is_empty());
    }

    #[test]
    fn test_selecting_date_without_venue_is_an_error() {
        let session = Session::new(ConversationState::SelectingDate, None);

        let result = handle_selecting_date(&sanitize("2030-01-01"), &session, &ctx());

        assert!(matches!(
            result,
            Err(ConversationError::IncompleteSelection { field: "venue", .. })
        ));
    }

    #[test]
    fn test_selecting_tickets_shows_total() {
        let mut selection = date_selection();
        selection.date = clock().today().checked_add_days(Days::new(1));
        let session = session_at(ConversationState::SelectingTickets, selection);

        let transition = handle_selecting_tickets(&sanitize("4"), &session).unwrap();

        assert_eq!(transition.next_state, ConversationState::Confirming);
        assert!(transition.reply.contains("4 ticket(s) for Museum of Modern Art"));
        assert!(transition.reply.contains(&format!("Total price: {}", Price::from_dollars(100))));
    }

    #[tokio::test]
    async fn test_confirming_yes_persists_booking() {
        let sink = Arc::new(RecordingBookingSink::new());
        let ctx = ctx_with(Arc::new(FixedAvailability(true)), sink.clone());
        let session = session_at(ConversationState::Confirming, full_selection());
        let identity = Identity::new("chat-1");

        let transition = handle_confirming(&sanitize("Yes!"), &session, &identity, &ctx)
            .await
            .unwrap();

        assert_eq!(transition.next_state, ConversationState::Idle);
        assert!(transition.next_selection.is_none());
        let persisted = sink.persisted();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].ticket_count, 3);
        assert_eq!(persisted[0].total_price, Price::from_dollars(75));
        assert_eq!(persisted[0].identity, identity);
        assert!(transition.reply.contains(&persisted[0].transaction_id.to_string()));
    }

    #[tokio::test]
    async fn test_confirming_no_cancels_without_persisting() {
        let sink = Arc::new(RecordingBookingSink::new());
        let ctx = ctx_with(Arc::new(FixedAvailability(true)), sink.clone());
        let session = session_at(ConversationState::Confirming, full_selection());

        let transition = handle_confirming(&sanitize("NO"), &session, &Identity::new("c"), &ctx)
            .await
            .unwrap();

        assert_eq!(transition, Transition::finish(prompts::BOOKING_CANCELLED));
        assert!(sink.persisted().is_empty());
    }

    #[tokio::test]
    async fn test_confirming_other_text_reprompts() {
        let session = session_at(ConversationState::Confirming, full_selection());

        let transition = handle_confirming(&sanitize("maybe"), &session, &Identity::new("c"), &ctx())
            .await
            .unwrap();

        assert_eq!(transition, Transition::stay(&session, prompts::CONFIRMATION_REPROMPT));
    }

    #[tokio::test]
    async fn test_confirming_surfaces_sink_failure() {
        let ctx = ctx_with(Arc::new(FixedAvailability(true)), Arc::new(FailingBookingSink));
        let session = session_at(ConversationState::Confirming, full_selection());

        let result = handle_confirming(&sanitize("yes"), &session, &Identity::new("c"), &ctx).await;

        assert!(matches!(result, Err(ConversationError::Collaborator(_))));
    }

    #[test]
    fn test_placeholders_return_to_idle() {
        let session = session_at(ConversationState::Modifying, full_selection());

        assert_eq!(
            handle_modifying(&sanitize("x"), &session).session(),
            Session::default()
        );
        assert_eq!(
            handle_cancelling(&sanitize("x"), &session).reply,
            prompts::CANCELLATION_STUB
        );
    }
}
