//! Hub configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Room used when a client connects or lists users without naming one.
pub const DEFAULT_ROOM: &str = "general";

/// Number of broadcasts kept per room.
pub const MAX_HISTORY_SIZE: usize = 20;

/// Tunables for a [`ChatSystem`](crate::lifecycle::ChatSystem).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub default_room: String,
    pub max_history: usize,
    /// Capacity of the hub's own mailbox.
    pub hub_buffer: usize,
    /// Requested capacity of each session's mailbox. A full mailbox drops
    /// deliveries. See [`HubConfig::session_buffer`] for the size actually used.
    pub client_buffer: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            default_room: DEFAULT_ROOM.to_string(),
            max_history: MAX_HISTORY_SIZE,
            hub_buffer: 64,
            client_buffer: 64,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("default room must not be empty")]
    EmptyDefaultRoom,
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

impl HubConfig {
    pub fn with_default_room(mut self, room: impl Into<String>) -> Self {
        self.default_room = room.into();
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_client_buffer(mut self, client_buffer: usize) -> Self {
        self.client_buffer = client_buffer;
        self
    }

    /// Mailbox capacity given to each session.
    ///
    /// A joining session receives the whole room history in one go, before it
    /// reads anything, so its mailbox must hold at least `max_history` entries
    /// plus one live event.
    pub fn session_buffer(&self) -> usize {
        self.client_buffer.max(self.max_history.saturating_add(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_room.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultRoom);
        }
        if self.max_history == 0 {
            return Err(ConfigError::Zero("max_history"));
        }
        if self.hub_buffer == 0 {
            return Err(ConfigError::Zero("hub_buffer"));
        }
        if self.client_buffer == 0 {
            return Err(ConfigError::Zero("client_buffer"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = HubConfig::default();
        assert_eq!(config.default_room, "general");
        assert_eq!(config.max_history, 20);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            HubConfig::default().with_default_room(" ").validate(),
            Err(ConfigError::EmptyDefaultRoom)
        );
        assert_eq!(
            HubConfig::default().with_max_history(0).validate(),
            Err(ConfigError::Zero("max_history"))
        );
        assert_eq!(
            HubConfig::default().with_client_buffer(0).validate(),
            Err(ConfigError::Zero("client_buffer"))
        );
    }

    #[test]
    fn session_buffer_fits_a_full_replay() {
        assert_eq!(HubConfig::default().session_buffer(), 64);

        let config = HubConfig::default().with_max_history(100);
        assert_eq!(config.session_buffer(), 101);

        let config = HubConfig::default().with_max_history(5).with_client_buffer(2);
        assert_eq!(config.session_buffer(), 6);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: HubConfig = serde_json::from_str(r#"{"max_history": 5}"#).unwrap();
        assert_eq!(config.max_history, 5);
        assert_eq!(config.default_room, "general");
    }
}
