//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the actor system.
//!
//! ## Key Types
//!
//! - [`Actor`]: The trait that every message-driven component implements.
//! - [`ActorRunner`]: The generic event loop that owns an actor and its mailbox.
//! - [`Address`]: The handle used to reach the actor (see [`crate::framework::address`]).

use crate::framework::address::{mailbox, Address};
use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Trait with Lifecycle Hooks)
// =============================================================================

/// Trait that any message-driven component must implement to be driven by [`ActorRunner`].
///
/// # Architecture Note
/// The runner calls [`Actor::handle`] for exactly one message at a time, so an
/// implementation can keep its state in plain fields. No `Mutex` or `RwLock` is
/// needed: exclusive ownership inside the task is the synchronization.
///
/// # Provided Methods (Hooks)
/// - [`Actor::on_start`] runs once before the first message.
/// - [`Actor::on_stop`] runs once after the last message.
///
/// Both default to doing nothing.
#[async_trait]
pub trait Actor: Send + 'static {
    /// The message type accepted by this actor's mailbox.
    type Message: Send + Debug + 'static;

    /// Called once, before any message is delivered.
    async fn on_start(&mut self) {}

    /// Handle a single message.
    async fn handle(&mut self, msg: Self::Message);

    /// Called once, after the loop has exited (shutdown signal or all senders dropped).
    async fn on_stop(&mut self) {}
}

// =============================================================================
// 2. THE GENERIC ACTOR RUNNER
// =============================================================================

/// Owns an [`Actor`] and the receiving end of its mailbox.
///
/// **Concurrency Model**:
/// Each runner lives in its own Tokio task and processes its messages
/// *sequentially*. Messages from one sender arrive in the order they were sent;
/// there is no ordering between different senders.
pub struct ActorRunner<A: Actor> {
    actor: A,
    receiver: mpsc::Receiver<A::Message>,
}

impl<A: Actor> ActorRunner<A> {
    /// Creates a runner and the address used to reach it.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the mailbox. When it is full, `tell`
    ///   waits and `try_tell` fails.
    pub fn new(actor: A, buffer_size: usize) -> (Self, Address<A::Message>) {
        let (address, receiver) = mailbox(buffer_size);
        (Self { actor, receiver }, address)
    }

    /// Runs the actor until every address is dropped.
    pub async fn run(self) {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Runs the actor's event loop until `shutdown` resolves or every address is dropped.
    ///
    /// Messages still queued when `shutdown` fires are discarded.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        // Extract just the type name (e.g., "ChatHub" instead of "chat_hub::hub_actor::hub::ChatHub")
        let actor_type = std::any::type_name::<A>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(actor_type, "Actor started");
        self.actor.on_start().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!(actor_type, "Shutdown requested");
                    break;
                }
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.actor.handle(msg).await,
                    None => {
                        debug!(actor_type, "All senders dropped");
                        break;
                    }
                }
            }
        }

        self.receiver.close();
        self.actor.on_stop().await;
        info!(actor_type, "Shutdown");
    }
}
