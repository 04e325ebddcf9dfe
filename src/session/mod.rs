//! Session orchestration over the exploration forest
//!
//! A [`SearchSession`] owns the forest and the collection ledger for one user
//! and coordinates search, expand, refresh, view toggling and collecting.

mod errors;
mod orchestrator;
mod state;

pub use errors::{SessionError, SessionResult};
pub use orchestrator::SearchSession;
pub use state::SessionState;
