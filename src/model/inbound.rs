use crate::model::DirectMessage;
use serde::{Deserialize, Serialize};

/// Joins the hub in `room`. An empty room means the hub's default room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connect {
    pub user_name: String,
    #[serde(default)]
    pub room: String,
}

impl Connect {
    pub fn new(user_name: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            room: room.into(),
        }
    }
}

/// Leaves the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Disconnect;

/// Posts `content` to a room.
///
/// An empty `room` posts to the sender's registered room. `user_name` is
/// informational only: the hub always attributes the post to the registered
/// name of the sending client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub user_name: String,
    pub content: String,
    #[serde(default)]
    pub room: String,
}

impl Message {
    pub fn new(user_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            content: content.into(),
            room: String::new(),
        }
    }

    pub fn in_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }
}

/// Asks for the names of users in `room`. An empty room means the default room.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListUsersRequest {
    #[serde(default)]
    pub room: String,
}

impl ListUsersRequest {
    pub fn new(room: impl Into<String>) -> Self {
        Self { room: room.into() }
    }
}

/// Every command the hub accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubCommand {
    Connect(Connect),
    Disconnect(Disconnect),
    Message(Message),
    DirectMessage(DirectMessage),
    ListUsers(ListUsersRequest),
}

impl From<Connect> for HubCommand {
    fn from(msg: Connect) -> Self {
        HubCommand::Connect(msg)
    }
}

impl From<Disconnect> for HubCommand {
    fn from(msg: Disconnect) -> Self {
        HubCommand::Disconnect(msg)
    }
}

impl From<Message> for HubCommand {
    fn from(msg: Message) -> Self {
        HubCommand::Message(msg)
    }
}

impl From<DirectMessage> for HubCommand {
    fn from(msg: DirectMessage) -> Self {
        HubCommand::DirectMessage(msg)
    }
}

impl From<ListUsersRequest> for HubCommand {
    fn from(msg: ListUsersRequest) -> Self {
        HubCommand::ListUsers(msg)
    }
}
