//! Error types for session actions

use thiserror::Error;

use crate::backend::BackendError;
use crate::events::SessionAction;
use crate::tree::NodeId;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend call behind an action failed
    #[error("{} failed: {source}", .action.label())]
    Backend {
        action: SessionAction,
        source: BackendError,
    },

    /// A refresh or expand is already in flight for this node
    #[error("Node {0} already has a request in flight")]
    NodeBusy(NodeId),

    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),

    #[error("Nothing has been collected yet")]
    EmptyCollection,

    #[error("The search tree is empty")]
    EmptyForest,

    #[error("Nothing to summarize")]
    EmptyContent,
}

impl SessionError {
    /// The single notification shown to the user
    ///
    /// Backend failure messages are passed through verbatim; transport
    /// failures of any kind collapse into one network hint.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Backend {
                action,
                source: BackendError::Rejected { message },
            } => format!("{} failed: {message}", action.label()),
            SessionError::Backend { action, .. } => format!(
                "{} failed: could not reach the search backend, check the network connection",
                action.label()
            ),
            other => other.to_string(),
        }
    }
}
