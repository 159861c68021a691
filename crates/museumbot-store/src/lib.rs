//! Storage-side collaborators: venue directories, booking sinks and the
//! availability oracle.
//!
//! The PostgreSQL implementations back a real deployment; the in-memory ones
//! back local runs without a database.

pub mod availability;
pub mod memory;
pub mod pg_booking_sink;
pub mod pg_venue_directory;
pub mod sample;
