//! Domain error types.

use thiserror::Error;

/// Failure reported by an external collaborator.
///
/// The message carries diagnostic detail for logs only; it is never shown to
/// the person on the other end of the conversation.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The venue directory could not be queried.
    #[error("venue directory error: {0}")]
    Directory(String),

    /// A booking could not be persisted. No partial write is visible.
    #[error("persistence error: {0}")]
    Persistence(String),
}
