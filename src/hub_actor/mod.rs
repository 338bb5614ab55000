//! # Hub Actor
//!
//! The chat hub: who is connected, in which room, and what was said there recently.
//!
//! ## Structure
//!
//! - [`hub`] - [`ChatHub`] state machine and its [`Actor`](crate::framework::Actor) implementation
//! - [`history`] - [`RoomHistory`] bounded per-room history
//! - [`error`] - [`HubError`], the reasons a request is dropped
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use chat_hub::hub_actor;
//! use chat_hub::lifecycle::HubConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = hub_actor::new(&HubConfig::default());
//!     let handle = tokio::spawn(actor.run());
//!
//!     // Sessions talk to the hub through clones of `client`.
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```

pub mod error;
pub mod history;
pub mod hub;

pub use error::*;
pub use history::RoomHistory;
pub use hub::{ChatHub, ClientInfo};

use crate::clients::HubClient;
use crate::framework::ActorRunner;
use crate::lifecycle::HubConfig;

/// Creates a new chat hub actor and its client.
pub fn new(config: &HubConfig) -> (ActorRunner<ChatHub>, HubClient) {
    let (actor, address) = ActorRunner::new(ChatHub::new(config), config.hub_buffer);
    let client = HubClient::new(address, config.session_buffer());
    (actor, client)
}
