//! Reply texts.
//!
//! Re-prompts are constants so that repeating the same bad input yields the
//! same reply.

use std::fmt::Write;

use chrono::NaiveDate;
use museumbot_core::booking::BookingRecord;
use museumbot_core::venue::{Price, Venue};

/// Reply to any idle message that does not ask to book.
pub const GREETING: &str =
    "Welcome to our museum ticketing service! Type 'book' to start booking tickets.";

/// Reply when a booking is requested but the directory is empty.
pub const NO_VENUES: &str =
    "Sorry, there are no museums available for booking right now. Please try again later.";

/// Re-prompt for a bad venue index.
pub const INVALID_SELECTION: &str = "Invalid museum selection. Please try again.";

/// Re-prompt for a malformed or past date.
pub const INVALID_DATE: &str = "Invalid date. Please use YYYY-MM-DD format and ensure the date is not in the past and is a valid date.";

/// Re-prompt for a date the venue cannot take.
pub const DATE_UNAVAILABLE: &str = "Sorry, that date is not available. Please choose another date.";

/// Prompt for the ticket count.
pub const TICKET_COUNT_PROMPT: &str = "How many tickets would you like? (Max 10)";

/// Re-prompt for a bad ticket count.
pub const INVALID_TICKET_COUNT: &str =
    "Invalid ticket count. Please enter a number between 1 and 10.";

/// Re-prompt while waiting for yes/no.
pub const CONFIRMATION_REPROMPT: &str = "Please type 'yes' to confirm or 'no' to cancel.";

/// Reply when the customer declines the draft.
pub const BOOKING_CANCELLED: &str =
    "Booking canceled. If you need to book again, just let me know!";

/// Placeholder reply for the cancelling state.
pub const CANCELLATION_STUB: &str = "Your booking has been canceled.";

/// Placeholder reply for the modifying state.
pub const MODIFICATION_STUB: &str = "Your booking has been modified.";

/// Reply after an unrecoverable failure.
pub const APOLOGY: &str =
    "I'm sorry, but an error occurred. Please try again or contact support.";

/// Fallback when a handler produced no text.
pub const NOT_UNDERSTOOD: &str = "I'm sorry, I didn't understand that. Can you please try again?";

/// Numbered venue listing, 1-based.
#[must_use]
pub fn venue_list(venues: &[Venue]) -> String {
    let mut list = String::from("Available Museums:\n\n");
    for (index, venue) in venues.iter().enumerate() {
        let _ = writeln!(list, "{}. {} - {}", index + 1, venue.name, venue.ticket_price);
    }
    list.push_str("\nPlease select a museum by entering its number.");
    list
}

/// Prompt for a visit date after a venue was chosen.
#[must_use]
pub fn date_prompt(venue: &Venue) -> String {
    format!(
        "You've selected {}. Please enter the date you'd like to visit (YYYY-MM-DD):",
        venue.name
    )
}

/// Summary of the draft with the total price, asking for yes/no.
#[must_use]
pub fn confirmation_request(venue: &Venue, date: NaiveDate, tickets: u8, total: Price) -> String {
    format!(
        "Please confirm your booking:\n{tickets} ticket(s) for {} on {date}\nTotal price: {total}\n{CONFIRMATION_REPROMPT}",
        venue.name
    )
}

/// Itemized confirmation of a persisted booking.
#[must_use]
pub fn booking_confirmed(booking: &BookingRecord) -> String {
    format!(
        "Booking confirmed! Your ticket details:\nMuseum: {}\nDate: {}\nTickets: {}\nTotal Price: {}\nTransaction ID: {}\n\nThank you for booking with us!",
        booking.venue.name,
        booking.date,
        booking.ticket_count,
        booking.total_price,
        booking.transaction_id
    )
}
