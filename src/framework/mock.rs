//! # Mock Framework
//!
//! Utilities for testing actors in isolation.
//!
//! Use [`probe`] to get an [`Address`] to hand to the code under test and a
//! [`Probe`] that records everything delivered to it. Then use helpers like
//! [`Probe::expect_next`] or [`Probe::assert_empty`] to assert behavior.
//!
//! ```rust
//! use chat_hub::framework::mock::probe;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (address, mut probe) = probe::<&'static str>(4);
//!     address.try_tell("hello").unwrap();
//!     assert_eq!(probe.expect_next().await, "hello");
//!     probe.assert_empty();
//! }
//! ```

use crate::framework::address::{mailbox, Address};
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long [`Probe::expect_next`] waits before failing the test.
pub const DEFAULT_EXPECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Records messages delivered to its paired [`Address`].
pub struct Probe<M> {
    receiver: mpsc::Receiver<M>,
}

/// Creates an address and the probe that observes it.
pub fn probe<M>(capacity: usize) -> (Address<M>, Probe<M>) {
    let (address, receiver) = mailbox(capacity);
    (address, Probe { receiver })
}

impl<M: Debug> Probe<M> {
    /// Waits for the next message, panicking if none arrives in time.
    pub async fn expect_next(&mut self) -> M {
        match tokio::time::timeout(DEFAULT_EXPECT_TIMEOUT, self.receiver.recv()).await {
            Ok(Some(msg)) => msg,
            Ok(None) => panic!("Probe closed while waiting for a message"),
            Err(_) => panic!("No message arrived within {:?}", DEFAULT_EXPECT_TIMEOUT),
        }
    }

    /// Returns the next already-delivered message, if any.
    pub fn try_next(&mut self) -> Option<M> {
        self.receiver.try_recv().ok()
    }

    /// Returns every already-delivered message, oldest first.
    pub fn drain(&mut self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Panics if any message has been delivered and not consumed.
    pub fn assert_empty(&mut self) {
        if let Ok(msg) = self.receiver.try_recv() {
            panic!("Expected no messages, got {:?}", msg);
        }
    }

    /// Drops the receiving side, so the paired address reports itself closed.
    pub fn close(self) {
        drop(self.receiver);
    }
}
