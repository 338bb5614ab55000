//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the chat hub: configuring it,
//! spawning it, handing out sessions, and shutting it down.
//!
//! ## The ChatSystem Pattern
//!
//! ```rust,ignore
//! impl ChatSystem {
//!     pub fn new() -> Self {
//!         // 1. Create the actor and its client
//!         let (hub_actor, hub_client) = hub_actor::new(&config);
//!
//!         // 2. Start it with an explicit stop signal
//!         let handle = tokio::spawn(hub_actor.run_until(stop_signal));
//!
//!         Self { hub_client, handle, .. }
//!     }
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! Every [`ChatSession`](crate::clients::ChatSession) holds a clone of the hub
//! client, and the hub holds every session's address, so closing channels alone
//! would never end the loop. Shutdown therefore uses an explicit stop signal:
//!
//! 1. **Signal** - the stop channel fires
//! 2. **Hub exits its loop** - queued requests are discarded
//! 3. **`on_stop`** - registry and history are cleared
//! 4. **Await completion** - the task handle is joined
//!
//! ## Observability & Tracing
//!
//! See the [`tracing`] module for [`setup_tracing`] and what gets logged.

pub mod chat_system;
pub mod config;
pub mod tracing;

pub use self::chat_system::*;
pub use self::config::*;
pub use self::tracing::*;
