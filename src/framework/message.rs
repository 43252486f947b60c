//! # Store Messages
//!
//! Message types exchanged between a [`StoreClient`](crate::framework::StoreClient) and a
//! [`StoreActor`](crate::framework::StoreActor).

use crate::framework::error::FrameworkError;
use crate::framework::state::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// - **Action**: apply a [`StoreState::Action`] and return its [`StoreState::Outcome`].
/// - **Inspect**: return a clone of the whole state without changing it.
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Action {
        action: S::Action,
        respond_to: Response<S::Outcome>,
    },
    Inspect {
        respond_to: Response<S>,
    },
}
