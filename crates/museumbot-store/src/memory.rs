//! In-memory collaborators for running without a database.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use museumbot_core::booking::{BookingRecord, TransactionId};
use museumbot_core::collaborators::{BookingSink, VenueDirectory};
use museumbot_core::error::CollaboratorError;
use museumbot_core::venue::Venue;
use tracing::info;

use crate::sample::sample_venues;

/// A fixed venue list, returned in insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryVenueDirectory {
    venues: Vec<Venue>,
}

impl InMemoryVenueDirectory {
    /// Creates a directory over `venues`.
    #[must_use]
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// Creates a directory holding the sample venues.
    #[must_use]
    pub fn with_samples() -> Self {
        Self::new(sample_venues())
    }
}

#[async_trait]
impl VenueDirectory for InMemoryVenueDirectory {
    async fn list_venues(&self) -> Result<Vec<Venue>, CollaboratorError> {
        Ok(self.venues.clone())
    }
}

/// Keeps persisted bookings in a vector.
#[derive(Debug, Default)]
pub struct InMemoryBookingSink {
    bookings: Mutex<Vec<BookingRecord>>,
}

impl InMemoryBookingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All bookings, in persistence order.
    pub fn bookings(&self) -> Vec<BookingRecord> {
        self.bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bookings whose visit date falls within `[from, to]`.
    pub fn bookings_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<BookingRecord> {
        self.bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|booking| (from..=to).contains(&booking.date))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BookingSink for InMemoryBookingSink {
    async fn persist(&self, booking: &BookingRecord) -> Result<TransactionId, CollaboratorError> {
        let mut bookings = self.bookings.lock().unwrap_or_else(PoisonError::into_inner);
        if bookings
            .iter()
            .any(|existing| existing.transaction_id == booking.transaction_id)
        {
            return Err(CollaboratorError::Persistence(format!(
                "duplicate transaction id {}",
                booking.transaction_id
            )));
        }
        bookings.push(booking.clone());
        info!(transaction_id = %booking.transaction_id, "booking stored in memory");
        Ok(booking.transaction_id.clone())
    }
}
