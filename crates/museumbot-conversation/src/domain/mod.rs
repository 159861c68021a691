//! Pure conversation model: states, sessions, input sanitization,
//! validation rules and reply texts.

pub mod prompts;
pub mod sanitize;
pub mod session;
pub mod state;
pub mod validators;
