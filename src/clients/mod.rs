//! Type-safe wrappers around the hub's [`Address`](crate::framework::Address).
//!
//! - [`HubClient`]: cloneable handle to the hub, opens sessions.
//! - [`ChatSession`]: one connected user (a [`SessionHandle`] to send, an [`Inbox`] to receive).

pub mod error;
pub mod hub_client;
pub mod session;

pub use error::*;
pub use hub_client::*;
pub use session::*;
