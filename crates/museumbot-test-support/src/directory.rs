//! Test venue directories.

use async_trait::async_trait;
use museumbot_core::collaborators::VenueDirectory;
use museumbot_core::error::CollaboratorError;
use museumbot_core::venue::{Price, Venue};

/// Three venues with whole-dollar prices, in a fixed order.
#[must_use]
pub fn three_venues() -> Vec<Venue> {
    vec![
        Venue::new("LOUVRE001", "The Louvre", Price::from_dollars(20)),
        Venue::new("MOMA002", "Museum of Modern Art", Price::from_dollars(25)),
        Venue::new("BRITISH003", "British Museum", Price::from_dollars(18)),
    ]
}

/// A directory that always lists the same venues.
#[derive(Debug, Clone)]
pub struct StaticVenueDirectory(pub Vec<Venue>);

#[async_trait]
impl VenueDirectory for StaticVenueDirectory {
    async fn list_venues(&self) -> Result<Vec<Venue>, CollaboratorError> {
        Ok(self.0.clone())
    }
}

/// A directory that always fails. Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingVenueDirectory;

#[async_trait]
impl VenueDirectory for FailingVenueDirectory {
    async fn list_venues(&self) -> Result<Vec<Venue>, CollaboratorError> {
        Err(CollaboratorError::Directory("connection refused".into()))
    }
}
