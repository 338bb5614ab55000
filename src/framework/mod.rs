//! Generic in-process actor framework.
//!
//! This module provides the messaging substrate the chat hub runs on: addressable
//! mailboxes, a sequential event loop with lifecycle hooks, and test probes.
//!
//! # Main Components
//!
//! - [`Actor`] - Trait implemented by message-driven components
//! - [`ActorRunner`] - Generic event loop that drives an [`Actor`]
//! - [`Address`] / [`ClientId`] - Mailbox handles with an explicit identity
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for probes that stand in for connected clients.

pub mod address;
pub mod core;
pub mod error;
pub mod mock;

// Re-export core types for convenience
pub use address::{mailbox, Address, ClientId};
pub use core::*;
pub use error::FrameworkError;
