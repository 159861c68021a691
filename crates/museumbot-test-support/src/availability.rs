//! Test availability oracles.

use std::sync::Mutex;

use chrono::NaiveDate;
use museumbot_core::collaborators::AvailabilityOracle;
use museumbot_core::venue::VenueId;

/// An oracle that gives the same answer for every date and venue.
#[derive(Debug, Clone, Copy)]
pub struct FixedAvailability(pub bool);

impl AvailabilityOracle for FixedAvailability {
    fn is_available(&self, _date: NaiveDate, _venue_id: &VenueId) -> bool {
        self.0
    }
}

/// An oracle that records every query and answers from a script, repeating
/// the last answer once the script runs out.
#[derive(Debug)]
pub struct RecordingAvailability {
    answers: Vec<bool>,
    queries: Mutex<Vec<(NaiveDate, VenueId)>>,
}

impl RecordingAvailability {
    /// Create a recording oracle that answers with `answers` in order.
    #[must_use]
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every `(date, venue)` pair queried.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn queries(&self) -> Vec<(NaiveDate, VenueId)> {
        self.queries.lock().unwrap().clone()
    }
}

impl AvailabilityOracle for RecordingAvailability {
    fn is_available(&self, date: NaiveDate, venue_id: &VenueId) -> bool {
        let mut queries = self.queries.lock().unwrap();
        let index = queries.len();
        queries.push((date, venue_id.clone()));
        self.answers
            .get(index)
            .or_else(|| self.answers.last())
            .copied()
            .unwrap_or(true)
    }
}
