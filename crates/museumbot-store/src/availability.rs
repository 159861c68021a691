//! Randomized availability oracle.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use museumbot_core::collaborators::AvailabilityOracle;
use museumbot_core::rng::DeterministicRng;
use museumbot_core::venue::VenueId;
use tracing::debug;

/// Accepts a date with probability `rate`, independently of the venue.
///
/// Stands in for a real capacity check until one exists.
pub struct RandomAvailability {
    rng: Mutex<Box<dyn DeterministicRng>>,
    rate: f64,
}

impl RandomAvailability {
    /// Creates an oracle that answers `true` with probability `rate`, clamped
    /// to `[0, 1]`.
    #[must_use]
    pub fn new(rng: impl DeterministicRng + 'static, rate: f64) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
            rate: rate.clamp(0.0, 1.0),
        }
    }

    /// The configured acceptance rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl std::fmt::Debug for RandomAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomAvailability")
            .field("rate", &self.rate)
            .finish_non_exhaustive()
    }
}

impl AvailabilityOracle for RandomAvailability {
    fn is_available(&self, date: NaiveDate, venue_id: &VenueId) -> bool {
        let roll = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_f64();
        let available = roll < self.rate;
        debug!(%date, %venue_id, available, "availability checked");
        available
    }
}
