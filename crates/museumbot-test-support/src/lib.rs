//! Shared test mocks and utilities for the museum ticket booking assistant.

mod availability;
mod clock;
mod directory;
mod rng;
mod sink;

pub use availability::{FixedAvailability, RecordingAvailability};
pub use clock::FixedClock;
pub use directory::{FailingVenueDirectory, StaticVenueDirectory, three_venues};
pub use rng::{MockRng, SequenceRng};
pub use sink::{FailingBookingSink, RecordingBookingSink};
