//! `PostgreSQL` implementation of the `BookingSink` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use museumbot_core::booking::{BookingRecord, TransactionId};
use museumbot_core::collaborators::BookingSink;
use museumbot_core::error::CollaboratorError;

/// PostgreSQL-backed booking sink. Each booking is a single-row insert, so a
/// failure leaves nothing behind.
#[derive(Debug, Clone)]
pub struct PgBookingSink {
    pool: PgPool,
}

impl PgBookingSink {
    /// Creates a new `PgBookingSink`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingSink for PgBookingSink {
    async fn persist(&self, booking: &BookingRecord) -> Result<TransactionId, CollaboratorError> {
        let booking_id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO bookings (booking_id, transaction_id, venue_id, venue_name, visit_date, \
             ticket_count, total_price_cents, identity, booked_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(booking_id)
        .bind(&booking.transaction_id.0)
        .bind(&booking.venue.id.0)
        .bind(&booking.venue.name)
        .bind(booking.date)
        .bind(i16::from(booking.ticket_count))
        .bind(booking.total_price.cents())
        .bind(booking.identity.as_str())
        .bind(booking.booked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CollaboratorError::Persistence(e.to_string()))?;

        info!(%booking_id, transaction_id = %booking.transaction_id, "booking row inserted");
        Ok(booking.transaction_id.clone())
    }
}
