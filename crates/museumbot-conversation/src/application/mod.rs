//! Per-state handlers, the session store and the dispatcher that ties them
//! together.

pub mod dispatcher;
pub mod handlers;
pub mod session_store;
