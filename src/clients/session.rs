//! # Chat Session
//!
//! A [`ChatSession`] is one user's seat at the hub: its own mailbox (so the hub can
//! reply), the user name, the current room, and a [`HubClient`] to send through.
//!
//! Use [`ChatSession::split`] when sending and receiving happen in different
//! branches of a `tokio::select!`.

use crate::clients::{ClientError, HubClient};
use crate::framework::{Address, ClientId};
use crate::model::{
    Connect, DirectMessage, Disconnect, ListUsersRequest, Message, ServerEvent,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Sending half of a session.
pub struct SessionHandle {
    hub: HubClient,
    address: Address<ServerEvent>,
    user_name: String,
    room: String,
}

/// Receiving half of a session.
pub struct Inbox {
    receiver: mpsc::Receiver<ServerEvent>,
}

/// One connected (or about to connect) chat user.
pub struct ChatSession {
    handle: SessionHandle,
    inbox: Inbox,
}

impl ChatSession {
    pub(crate) fn new(
        hub: HubClient,
        address: Address<ServerEvent>,
        receiver: mpsc::Receiver<ServerEvent>,
        user_name: String,
        room: String,
    ) -> Self {
        Self {
            handle: SessionHandle {
                hub,
                address,
                user_name,
                room,
            },
            inbox: Inbox { receiver },
        }
    }

    pub fn split(self) -> (SessionHandle, Inbox) {
        (self.handle, self.inbox)
    }

    pub fn id(&self) -> ClientId {
        self.handle.id()
    }

    pub fn user_name(&self) -> &str {
        self.handle.user_name()
    }

    pub fn room(&self) -> &str {
        self.handle.room()
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        self.handle.connect().await
    }

    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.handle.disconnect().await
    }

    pub async fn post(&self, content: impl Into<String>) -> Result<(), ClientError> {
        self.handle.post(content).await
    }

    pub async fn post_to(
        &self,
        room: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.handle.post_to(room, content).await
    }

    pub async fn direct(
        &self,
        to_user: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.handle.direct(to_user, content).await
    }

    pub async fn list_users(&self) -> Result<(), ClientError> {
        self.handle.list_users().await
    }

    pub async fn switch_room(&mut self, room: impl Into<String>) -> Result<(), ClientError> {
        self.handle.switch_room(room).await
    }

    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<ServerEvent, ClientError> {
        self.inbox.recv_timeout(timeout).await
    }
}

impl SessionHandle {
    pub fn id(&self) -> ClientId {
        self.address.id()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    #[instrument(skip(self), fields(user = %self.user_name, room = %self.room))]
    pub async fn connect(&self) -> Result<(), ClientError> {
        self.hub
            .send(&self.address, Connect::new(&self.user_name, &self.room))
            .await
    }

    #[instrument(skip(self), fields(user = %self.user_name))]
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.hub.send(&self.address, Disconnect).await
    }

    /// Posts to the room this client is registered in.
    pub async fn post(&self, content: impl Into<String>) -> Result<(), ClientError> {
        self.hub
            .send(&self.address, Message::new(&self.user_name, content))
            .await
    }

    /// Posts to `room`, whether or not this client is registered there.
    pub async fn post_to(
        &self,
        room: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ClientError> {
        let msg = Message::new(&self.user_name, content).in_room(room);
        self.hub.send(&self.address, msg).await
    }

    pub async fn direct(
        &self,
        to_user: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ClientError> {
        let dm = DirectMessage::new(&self.user_name, to_user, content);
        self.hub.send(&self.address, dm).await
    }

    /// Asks for the users of the current room. The reply arrives in the inbox
    /// as [`ServerEvent::Users`].
    pub async fn list_users(&self) -> Result<(), ClientError> {
        self.hub
            .send(&self.address, ListUsersRequest::new(&self.room))
            .await
    }

    /// Leaves the current room and joins `room`.
    ///
    /// Both requests come from the same sender, so the hub sees them in order.
    #[instrument(skip(self, room), fields(user = %self.user_name, from = %self.room))]
    pub async fn switch_room(&mut self, room: impl Into<String>) -> Result<(), ClientError> {
        let room = room.into();
        debug!(to = %room, "Switching room");
        self.disconnect().await?;
        self.room = room;
        self.connect().await
    }
}

impl Inbox {
    /// Next event delivered by the hub.
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        self.receiver.recv().await
    }

    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<ServerEvent, ClientError> {
        match tokio::time::timeout(timeout, self.receiver.recv()).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => Err(ClientError::Closed),
            Err(_) => Err(ClientError::Timeout),
        }
    }
}
