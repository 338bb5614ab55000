//! Error types for the chat hub.

use crate::framework::ClientId;
use thiserror::Error;

/// Reasons the hub drops an inbound command.
///
/// None of these reach the sender: the hub's run loop logs them and moves on
/// to the next message. Handlers return them so the outcome is testable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HubError {
    /// The sender is already registered; the second connect is ignored.
    #[error("client {client} already connected")]
    DuplicateConnect { client: ClientId },

    /// Disconnect from a sender that is not registered.
    #[error("disconnect from unknown client {client}")]
    UnknownSenderOnDisconnect { client: ClientId },

    /// Room message from a sender that is not registered.
    #[error("message from unknown client {client} ignored")]
    UnknownSenderOnMessage { client: ClientId },

    /// No registered client carries the target user name.
    #[error("direct message to unknown user {to_user:?}")]
    RecipientNotFound { to_user: String },
}
