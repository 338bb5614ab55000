//! Error types for hub clients.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors a client can observe while talking to the hub.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The hub's mailbox is gone (the hub has stopped).
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// Nothing arrived in the session inbox before the deadline.
    #[error("Timed out waiting for the hub")]
    Timeout,

    /// The session inbox is closed.
    #[error("Session closed")]
    Closed,
}

impl From<FrameworkError> for ClientError {
    fn from(e: FrameworkError) -> Self {
        ClientError::ActorCommunicationError(e.to_string())
    }
}
