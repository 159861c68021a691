//! Booking value types handed to the booking sink.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::venue::{Price, Venue};

/// Opaque, stable key identifying one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(pub String);

impl Identity {
    /// Creates an identity from any string-like key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier returned to the customer once a booking is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl TransactionId {
    /// Generates a transaction id for a booking confirmed at `at`: `TXN`,
    /// the Unix epoch milliseconds, then a random 8-hex-digit suffix so that
    /// bookings confirmed in the same millisecond still get distinct ids.
    #[must_use]
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("TXN{}-{}", at.timestamp_millis(), &suffix[..8]))
    }
}

impl TransactionId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confirmed booking, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Transaction identifier shown to the customer.
    pub transaction_id: TransactionId,
    /// The venue being visited.
    pub venue: Venue,
    /// The visit date.
    pub date: NaiveDate,
    /// Number of tickets, in `[1, 10]`.
    pub ticket_count: u8,
    /// `venue.ticket_price * ticket_count`.
    pub total_price: Price,
    /// The conversation that made the booking.
    pub identity: Identity,
    /// When the booking was confirmed.
    pub booked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_transaction_id_starts_with_epoch_millis() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        let id = TransactionId::generate(at);

        let suffix = id.as_str().strip_prefix("TXN1768471200000-").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_transaction_ids_differ_within_the_same_millisecond() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        let first = TransactionId::generate(at);
        let second = TransactionId::generate(at);

        assert_ne!(first, second);
    }
}
