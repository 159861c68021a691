//! Museumbot Core — shared domain abstractions.
//!
//! This crate defines the value types and collaborator contracts that the
//! conversation engine and the storage adapters depend on. It contains no
//! infrastructure code.

pub mod booking;
pub mod clock;
pub mod collaborators;
pub mod error;
pub mod rng;
pub mod venue;
