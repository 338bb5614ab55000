//! # Hub Client
//!
//! Provides a high‑level API for interacting with the chat hub actor.
//! It wraps the hub's `Address<HubRequest>` and hands out [`ChatSession`]s.

use crate::clients::{ChatSession, ClientError};
use crate::framework::{mailbox, Address};
use crate::model::{HubCommand, HubRequest, ServerEvent};
use tracing::{debug, instrument};

/// Client for interacting with the chat hub.
#[derive(Clone)]
pub struct HubClient {
    inner: Address<HubRequest>,
    client_buffer: usize,
}

impl HubClient {
    /// `client_buffer` is the mailbox capacity of every session opened through this client.
    pub fn new(inner: Address<HubRequest>, client_buffer: usize) -> Self {
        Self {
            inner,
            client_buffer,
        }
    }

    /// Sends `command` to the hub on behalf of `from`.
    #[instrument(skip_all, fields(client = %from.id()))]
    pub async fn send(
        &self,
        from: &Address<ServerEvent>,
        command: impl Into<HubCommand> + Send,
    ) -> Result<(), ClientError> {
        let command = command.into();
        debug!(?command, "Sending request");
        self.inner
            .tell(HubRequest::new(from.clone(), command))
            .await
            .map_err(ClientError::from)
    }

    /// Opens a new, not yet connected, session for `user_name` in `room`.
    ///
    /// Call [`ChatSession::connect`] to register it with the hub.
    pub fn session(&self, user_name: impl Into<String>, room: impl Into<String>) -> ChatSession {
        let (address, receiver) = mailbox(self.client_buffer);
        ChatSession::new(self.clone(), address, receiver, user_name.into(), room.into())
    }
}
