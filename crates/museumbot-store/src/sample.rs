//! Sample venues used to seed empty directories.

use museumbot_core::venue::{Price, Venue};

/// The Louvre, the Museum of Modern Art and the British Museum.
#[must_use]
pub fn sample_venues() -> Vec<Venue> {
    vec![
        Venue::new("LOUVRE001", "The Louvre", Price::from_dollars(20)),
        Venue::new("MOMA002", "Museum of Modern Art", Price::from_dollars(25)),
        Venue::new("BRITISH003", "British Museum", Price::from_dollars(18)),
    ]
}
