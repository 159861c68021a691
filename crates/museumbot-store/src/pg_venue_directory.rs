//! `PostgreSQL` implementation of the `VenueDirectory` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use museumbot_core::collaborators::VenueDirectory;
use museumbot_core::error::CollaboratorError;
use museumbot_core::venue::{Price, Venue};

/// PostgreSQL-backed venue directory.
///
/// Venues are listed by `display_order`, then `venue_id`, so the numbering a
/// customer sees stays the same between turns.
#[derive(Debug, Clone)]
pub struct PgVenueDirectory {
    pool: PgPool,
}

impl PgVenueDirectory {
    /// Creates a new `PgVenueDirectory`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts `venues` when the table is empty, numbering them in the given
    /// order. Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if any query fails.
    pub async fn seed_if_empty(&self, venues: &[Venue]) -> Result<u64, sqlx::Error> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            debug!(existing, "venue table already populated");
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for (position, venue) in (0_i32..).zip(venues) {
            inserted += sqlx::query(
                "INSERT INTO venues (venue_id, name, ticket_price_cents, display_order) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (venue_id) DO NOTHING",
            )
            .bind(&venue.id.0)
            .bind(&venue.name)
            .bind(venue.ticket_price.cents())
            .bind(position)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;

        info!(inserted, "seeded venue table");
        Ok(inserted)
    }
}

#[async_trait]
impl VenueDirectory for PgVenueDirectory {
    async fn list_venues(&self) -> Result<Vec<Venue>, CollaboratorError> {
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT venue_id, name, ticket_price_cents FROM venues \
             ORDER BY display_order, venue_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CollaboratorError::Directory(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, cents)| Venue::new(id, name, Price::from_cents(cents)))
            .collect())
    }
}
