use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A room message. Kept in the room's history and delivered to every room member
/// except its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub from_user: String,
    pub content: String,
    pub room: String,
    pub sent_at: DateTime<Utc>,
}

/// A join/leave notification. Never kept in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvent {
    pub text: String,
    pub at: DateTime<Utc>,
}

impl SystemEvent {
    pub fn joined(user_name: &str, room: &str) -> Self {
        Self {
            text: format!("{user_name} joined {room}"),
            at: Utc::now(),
        }
    }

    pub fn left(user_name: &str, room: &str) -> Self {
        Self {
            text: format!("{user_name} left {room}"),
            at: Utc::now(),
        }
    }
}

/// Reply to a [`ListUsersRequest`](crate::model::ListUsersRequest). Order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub user_names: Vec<String>,
}

/// A private message. Sent by a client as a request and delivered by the hub,
/// with a fresh `sent_at`, to the single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub from_user: String,
    pub to_user: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl DirectMessage {
    pub fn new(
        from_user: impl Into<String>,
        to_user: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            from_user: from_user.into(),
            to_user: to_user.into(),
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Everything the hub delivers to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Broadcast(Arc<Broadcast>),
    System(SystemEvent),
    Users(ListUsersResponse),
    Direct(DirectMessage),
}
