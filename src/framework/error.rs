//! # Framework Errors
//!
//! Errors raised by the store runtime itself, as opposed to the state it hosts.

/// Errors that can occur while talking to a `StoreActor`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}
