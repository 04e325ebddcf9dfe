//! Error types for backend calls
//!
//! Two kinds of failure reach callers: the request never produced a usable
//! response (transport, HTTP status, undecodable body), or the backend
//! answered with `success: false` and a message meant for the user.

use thiserror::Error;

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The request did not complete (connect, timeout, I/O)
    #[error("Request to '{endpoint}' failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The backend answered with a non-success HTTP status
    #[error("Backend returned HTTP {status} for '{endpoint}'")]
    Status { endpoint: String, status: u16 },

    /// The response body could not be decoded
    #[error("Invalid response from '{endpoint}': {message}")]
    Decode { endpoint: String, message: String },

    /// The backend reported `success: false`
    #[error("{message}")]
    Rejected { message: String },
}

impl BackendError {
    pub(crate) fn from_reqwest(endpoint: &str, error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return BackendError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return BackendError::Decode {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            };
        }
        BackendError::Transport {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    }

    /// The request never produced a usable answer
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !self.is_application()
    }

    /// The backend answered and reported failure itself
    #[must_use]
    pub fn is_application(&self) -> bool {
        matches!(self, BackendError::Rejected { .. })
    }
}
