//! Turns [`ServerEvent`]s into terminal lines.

use crate::model::ServerEvent;
use chrono::{DateTime, Utc};

/// Renders `event` for a user currently in `room`.
pub fn render(event: &ServerEvent, room: &str) -> String {
    match event {
        ServerEvent::Broadcast(msg) => format!(
            "[{}] [{}] {}: {}",
            clock(msg.sent_at),
            msg.room,
            msg.from_user,
            msg.content
        ),
        ServerEvent::Direct(dm) => format!(
            "[{}] [DM from {}]: {}",
            clock(dm.sent_at),
            dm.from_user,
            dm.content
        ),
        ServerEvent::System(event) => format!("[{}] *** {} ***", clock(event.at), event.text),
        ServerEvent::Users(list) if list.user_names.is_empty() => {
            format!("No one online in {room}")
        }
        ServerEvent::Users(list) => {
            format!("Online in {room}: {}", list.user_names.join(", "))
        }
    }
}

/// One JSON object per event, for scripted consumers.
pub fn render_json(event: &ServerEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

/// `HH:MM:SS` in UTC.
pub fn clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}
