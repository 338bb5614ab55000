//! # Chat Hub
//!
//! > **A multi-room chat server built as a single actor.**
//!
//! One hub task owns every piece of shared state: which clients are connected, which
//! room each one is in, and the recent messages of every room. Clients never touch
//! that state; they send requests into the hub's mailbox and receive events in their
//! own. Because the hub handles one request at a time, no locks are needed.
//!
//! ## 🚀 Core Concepts
//!
//! ### Mailboxes as Identity
//! Every participant owns an [`Address`](framework::Address): a mailbox sender tagged
//! with a unique [`ClientId`](framework::ClientId). The hub keys its registry by that id,
//! so two sessions with the same user name are still two different clients.
//!
//! ### Rooms and History
//! Rooms are implicit: a room exists while somebody is in it or has posted to it.
//! The last [`MAX_HISTORY_SIZE`](lifecycle::MAX_HISTORY_SIZE) messages of each room are
//! replayed to whoever joins.
//!
//! ### Best-Effort Delivery
//! The hub never waits on a slow client. A delivery into a full mailbox is dropped,
//! and a client whose mailbox has closed is removed as if it had disconnected.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic run loop and mailbox plumbing.
//! - **Key items**: [`Actor`](framework::Actor), [`ActorRunner`](framework::ActorRunner),
//!   [`mailbox`](framework::mailbox), and the [`mock`](framework::mock) probe for tests.
//!
//! ### 2. The Vocabulary ([`model`])
//! Requests a client can send and events the hub delivers.
//! - **Key items**: [`HubCommand`](model::HubCommand), [`ServerEvent`](model::ServerEvent).
//!
//! ### 3. The Hub ([`hub_actor`])
//! Registry, per-room history, broadcast fan-out and direct-message routing.
//! - **Key items**: [`ChatHub`](hub_actor::ChatHub).
//!
//! ### 4. The Interface ([`clients`])
//! - **Key items**: [`HubClient`](clients::HubClient), [`ChatSession`](clients::ChatSession).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, startup, shutdown and tracing setup.
//! - **Key items**: [`ChatSystem`](lifecycle::ChatSystem), [`HubConfig`](lifecycle::HubConfig).
//!
//! ### 6. The Terminal ([`repl`], [`cli`])
//! Interactive sessions and the scripted demo behind the `chat-hub` binary.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Scripted conversation with info logs
//! cargo run -- demo
//!
//! # Chat as alice in the rust room
//! cargo run -- repl --user alice --room rust
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cli;
pub mod clients;
pub mod framework;
pub mod hub_actor;
pub mod lifecycle;
pub mod model;
pub mod repl;
