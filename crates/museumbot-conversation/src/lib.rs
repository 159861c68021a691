//! Museumbot — conversation state machine.
//!
//! Interprets each incoming text message against the sender's session,
//! validates it, advances or rejects the session, and produces the next
//! prompt. Venue listing, date availability and booking persistence are
//! delegated to the collaborators defined in `museumbot-core`.

pub mod application;
pub mod domain;
pub mod error;
