//! # Framework Errors
//!
//! Errors raised by the messaging substrate itself, independent of any actor's
//! domain logic.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Mailbox full")]
    MailboxFull,
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
