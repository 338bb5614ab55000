//! # Addresses
//!
//! An [`Address`] is the only way to reach an actor or a connected client. It pairs
//! the sending half of a bounded Tokio channel with a [`ClientId`], so whoever
//! receives a request also learns *who* sent it without any ambient context.

use crate::framework::FrameworkError;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a mailbox.
///
/// The hub keys its registry by this value. Two clones of the same [`Address`]
/// share one id; two calls to [`mailbox`] never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    fn next() -> Self {
        Self(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// A cloneable handle used to deliver messages of type `M` to a mailbox.
///
/// Cloning is cheap: only the channel sender and the id are copied.
pub struct Address<M> {
    id: ClientId,
    sender: mpsc::Sender<M>,
}

// Manual impl so `M` does not need to be `Clone`.
impl<M> Clone for Address<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            sender: self.sender.clone(),
        }
    }
}

impl<M> fmt::Debug for Address<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Address").field("id", &self.id).finish()
    }
}

/// Creates a new mailbox with the given capacity.
///
/// Returns the address (to hand out) and the receiver (to keep).
pub fn mailbox<M>(capacity: usize) -> (Address<M>, mpsc::Receiver<M>) {
    let (sender, receiver) = mpsc::channel(capacity);
    let address = Address {
        id: ClientId::next(),
        sender,
    };
    (address, receiver)
}

impl<M> Address<M> {
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Sends a message, waiting for mailbox capacity if needed.
    pub async fn tell(&self, msg: M) -> Result<(), FrameworkError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Sends a message without waiting.
    ///
    /// Fails with [`FrameworkError::MailboxFull`] when the receiver is lagging and
    /// with [`FrameworkError::ActorClosed`] when the receiver has been dropped.
    pub fn try_tell(&self, msg: M) -> Result<(), FrameworkError> {
        self.sender.try_send(msg).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => FrameworkError::MailboxFull,
            mpsc::error::TrySendError::Closed(_) => FrameworkError::ActorClosed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
