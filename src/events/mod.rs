//! Session event stream
//!
//! Lets a front end re-render when the forest or the ledger changes without
//! polling the session.

mod bus;
mod types;

pub use bus::SessionEventBus;
pub use types::{SessionAction, SessionEvent};
