//! Error types for camera synchronization
//!
//! This module defines the error kinds shared by the forward transform,
//! the restore path and the transport collaborators.

use std::fmt;

/// Result type for camera synchronization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Camera synchronization errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Host precondition not met (wrong view type, no open viewport,
    /// view not active, projection toggle unsupported, degenerate framing)
    HostPrecondition(String),

    /// Delivery to or from the relay failed
    Transport(String),

    /// Received camera state does not have the documented shape
    MalformedPayload(String),

    /// Host rejected a mutation inside a restore transaction
    HostOperation(String),

    /// The mutation thread no longer accepts restore requests
    QueueClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HostPrecondition(msg) => write!(f, "Host precondition failed: {}", msg),
            Error::Transport(msg) => write!(f, "Transport error: {}", msg),
            Error::MalformedPayload(msg) => write!(f, "Malformed camera state: {}", msg),
            Error::HostOperation(msg) => write!(f, "Host operation failed: {}", msg),
            Error::QueueClosed => write!(f, "Restore queue is closed"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
