//! Test booking sinks.

use std::sync::Mutex;

use async_trait::async_trait;
use museumbot_core::booking::{BookingRecord, TransactionId};
use museumbot_core::collaborators::BookingSink;
use museumbot_core::error::CollaboratorError;

/// A booking sink that records every persisted booking. Like the `bookings`
/// table, it refuses a transaction id it has already stored.
#[derive(Debug, Default)]
pub struct RecordingBookingSink {
    persisted: Mutex<Vec<BookingRecord>>,
}

impl RecordingBookingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all bookings that were persisted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn persisted(&self) -> Vec<BookingRecord> {
        self.persisted.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingSink for RecordingBookingSink {
    async fn persist(&self, booking: &BookingRecord) -> Result<TransactionId, CollaboratorError> {
        let mut persisted = self.persisted.lock().unwrap();
        if persisted
            .iter()
            .any(|existing| existing.transaction_id == booking.transaction_id)
        {
            return Err(CollaboratorError::Persistence(format!(
                "duplicate transaction id {}",
                booking.transaction_id
            )));
        }
        persisted.push(booking.clone());
        Ok(booking.transaction_id.clone())
    }
}

/// A booking sink that always fails with a persistence error.
#[derive(Debug)]
pub struct FailingBookingSink;

#[async_trait]
impl BookingSink for FailingBookingSink {
    async fn persist(&self, _booking: &BookingRecord) -> Result<TransactionId, CollaboratorError> {
        Err(CollaboratorError::Persistence("connection refused".into()))
    }
}
