//! Message shapes exchanged between chat clients and the hub.
//!
//! - [`inbound`]: what clients send ([`HubCommand`]).
//! - [`outbound`]: what the hub delivers back ([`ServerEvent`]).
//!
//! Every inbound command travels inside a [`HubRequest`], which carries the
//! sender's reply address explicitly.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

use crate::framework::Address;

/// Envelope delivered to the hub's mailbox.
#[derive(Debug)]
pub struct HubRequest {
    /// Reply address of the client that issued `command`. Its id is the registry key.
    pub from: Address<ServerEvent>,
    pub command: HubCommand,
}

impl HubRequest {
    pub fn new(from: Address<ServerEvent>, command: impl Into<HubCommand>) -> Self {
        Self {
            from,
            command: command.into(),
        }
    }
}
