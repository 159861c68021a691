//! Contracts for the external collaborators the conversation engine calls.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::booking::{BookingRecord, TransactionId};
use crate::error::CollaboratorError;
use crate::venue::{Venue, VenueId};

/// Read-only listing of bookable venues.
///
/// Implementations must return venues in a stable order: a customer picks a
/// venue by its 1-based position in a listing produced on an earlier turn.
#[async_trait]
pub trait VenueDirectory: Send + Sync {
    /// Lists all bookable venues in display order.
    async fn list_venues(&self) -> Result<Vec<Venue>, CollaboratorError>;
}

/// Authoritative answer to "can this venue be visited on this date".
pub trait AvailabilityOracle: Send + Sync {
    /// Returns `true` when `venue_id` accepts visitors on `date`.
    fn is_available(&self, date: NaiveDate, venue_id: &VenueId) -> bool;
}

/// Durable destination for confirmed bookings.
#[async_trait]
pub trait BookingSink: Send + Sync {
    /// Persists a booking and returns the transaction id it was stored under.
    async fn persist(&self, booking: &BookingRecord) -> Result<TransactionId, CollaboratorError>;
}
