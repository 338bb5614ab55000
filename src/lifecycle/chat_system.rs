use crate::clients::{ChatSession, HubClient};
use crate::framework::FrameworkError;
use crate::lifecycle::{ConfigError, HubConfig};
use tokio::sync::oneshot;
use tracing::{error, info};

/// The runtime orchestrator for the chat hub.
///
/// `ChatSystem` is responsible for:
/// - **Lifecycle Management**: Starting the hub task and stopping it on request
/// - **Session Creation**: Handing out [`ChatSession`]s wired to the hub
///
/// # Example
///
/// ```ignore
/// let system = ChatSystem::new();
///
/// let alice = system.session("alice", "general");
/// alice.connect().await?;
/// alice.post("hi").await?;
///
/// system.shutdown().await?;
/// ```
pub struct ChatSystem {
    /// Client for interacting with the hub actor
    pub hub_client: HubClient,

    config: HubConfig,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

impl ChatSystem {
    /// Starts a hub with the default configuration.
    pub fn new() -> Self {
        Self::start(HubConfig::default())
    }

    /// Validates `config` and starts a hub with it.
    pub fn with_config(config: HubConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config))
    }

    fn start(config: HubConfig) -> Self {
        let (hub_actor, hub_client) = crate::hub_actor::new(&config);
        let (stop, stopped) = oneshot::channel::<()>();

        // Sessions keep clones of the hub client alive, so the hub is stopped
        // with an explicit signal rather than by dropping clients.
        let handle = tokio::spawn(hub_actor.run_until(async move {
            let _ = stopped.await;
        }));

        Self {
            hub_client,
            config,
            stop,
            handle,
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Opens a session for `user_name` in `room`. An empty room means the
    /// configured default room.
    pub fn session(&self, user_name: impl Into<String>, room: impl Into<String>) -> ChatSession {
        let mut room = room.into();
        if room.is_empty() {
            room = self.config.default_room.clone();
        }
        self.hub_client.session(user_name, room)
    }

    /// Stops the hub and waits for its task to finish.
    ///
    /// Requests still queued in the hub's mailbox are discarded, and the hub
    /// clears its registry and history before exiting.
    pub async fn shutdown(self) -> Result<(), FrameworkError> {
        info!("Shutting down chat system...");

        // Ignored error: the hub already exited.
        let _ = self.stop.send(());

        if let Err(e) = self.handle.await {
            error!("Hub task failed: {:?}", e);
            return Err(FrameworkError::TaskFailed(e.to_string()));
        }

        info!("Chat system shutdown complete.");
        Ok(())
    }
}

impl Default for ChatSystem {
    fn default() -> Self {
        Self::new()
    }
}
