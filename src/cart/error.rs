//! Error types for the cart client.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors a [`CartClient`](crate::clients::CartClient) call can return.
///
/// The cart itself never fails; these only describe trouble reaching it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// The actor answered with an outcome for a different action.
    #[error("Unexpected cart outcome: expected {expected}, got {got}")]
    UnexpectedOutcome {
        expected: &'static str,
        got: &'static str,
    },
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        CartError::ActorCommunicationError(e.to_string())
    }
}
