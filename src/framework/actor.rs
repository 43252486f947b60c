//! # Generic Store Actor
//!
//! `StoreActor` is the "server" half of a store. It owns the state and the receiving end
//! of the channel, and applies requests one at a time in its own Tokio task.

use crate::framework::client::StoreClient;
use crate::framework::message::StoreRequest;
use crate::framework::state::StoreState;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The generic actor that owns one piece of state.
///
/// **Concurrency Model**:
/// Requests from every client clone are queued on one channel and handled
/// *sequentially*, so the state needs no `Mutex` or `RwLock`. Ordering between two
/// callers is the order in which their requests reach the channel.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new(state, buffer)` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use fieldcart::cart::{CartAction, CartOutcome, CartStore};
/// use fieldcart::framework::StoreActor;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(CartStore::default(), 8);
///     tokio::spawn(actor.run(()));
///
///     let outcome = client.dispatch(CartAction::CurrentCart).await.unwrap();
///     assert!(matches!(outcome, CartOutcome::CurrentCart(lines) if lines.is_empty()));
/// }
/// ```
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a new `StoreActor` around `state` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the channel. When it is full, client calls wait
    /// until there is space.
    pub fn new(state: S, buffer_size: usize) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self { receiver, state };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` argument is passed to every hook of the state.
    pub async fn run(mut self, context: S::Context) {
        // Extract just the type name (e.g., "CartStore" instead of "fieldcart::cart::store::CartStore")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        self.state.on_start(&context).await;
        info!(state_type, size = self.state.size(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Action { action, respond_to } => {
                    debug!(state_type, ?action, "Action");
                    let outcome = self.state.handle_action(action, &context).await;
                    debug!(state_type, ?outcome, size = self.state.size(), "Action done");
                    let _ = respond_to.send(Ok(outcome));
                }
                StoreRequest::Inspect { respond_to } => {
                    debug!(state_type, "Inspect");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(state_type, size = self.state.size(), "Shutdown");
    }
}
