//! # Mock Store & Testing Guide
//!
//! `MockStore<S>` hands out a real [`StoreClient<S>`] whose requests are answered from a
//! queue of expectations instead of a running state. Use it to test code that *talks to*
//! a store (e.g. [`CartClient`](crate::clients::CartClient)) without spawning the actor.
//!
//! | Feature | MockStore | Real Actor |
//! |---------|-----------|------------|
//! | **State** | None, answers are scripted | Real reducer |
//! | **Error Injection** | `return_err` | Drop the actor |
//! | **Use Case** | Logic *around* the client | The state itself, or the whole system |
//!
//! ```rust
//! use fieldcart::cart::{CartAction, CartOutcome, CartStore};
//! use fieldcart::framework::mock::MockStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<CartStore>::new();
//!     mock.expect_action().return_ok(CartOutcome::ClearProducts(0));
//!
//!     let client = mock.client();
//!     let outcome = client.dispatch(CartAction::ClearProducts).await.unwrap();
//!     assert!(matches!(outcome, CartOutcome::ClearProducts(0)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control, [`create_mock_client`] returns the raw receiver, and
//! [`expect_action`] / [`expect_inspect`] pull the next request off it.

use crate::framework::{FrameworkError, StoreClient, StoreRequest, StoreState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give it.
enum Expectation<S: StoreState> {
    Action {
        response: Result<S::Outcome, FrameworkError>,
    },
    Inspect {
        response: Result<S, FrameworkError>,
    },
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

fn push<S: StoreState>(expectations: &Expectations<S>, expectation: Expectation<S>) {
    expectations
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push_back(expectation);
}

/// A mock store with expectation tracking.
///
/// Expectations are consumed in the order they were declared. A request that does not
/// match the next expectation panics the background task, which surfaces in the test as
/// an `ActorDropped` error on the client side.
pub struct MockStore<S: StoreState> {
    client: StoreClient<S>,
    expectations: Expectations<S>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> MockStore<S> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, expectation) {
                    (StoreRequest::Action { respond_to, .. }, Some(Expectation::Action { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Inspect { respond_to }, Some(Expectation::Inspect { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects a `dispatch` call.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<S> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `inspect` call.
    pub fn expect_inspect(&mut self) -> InspectExpectationBuilder<S> {
        InspectExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<S: StoreState> Default for MockStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `dispatch` expectations.
pub struct ActionExpectationBuilder<S: StoreState> {
    expectations: Expectations<S>,
}

impl<S: StoreState> ActionExpectationBuilder<S> {
    pub fn return_ok(self, outcome: S::Outcome) {
        push(&self.expectations, Expectation::Action { response: Ok(outcome) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Action { response: Err(error) });
    }
}

/// Builder for `inspect` expectations.
pub struct InspectExpectationBuilder<S: StoreState> {
    expectations: Expectations<S>,
}

impl<S: StoreState> InspectExpectationBuilder<S> {
    pub fn return_ok(self, state: S) {
        push(&self.expectations, Expectation::Inspect { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Inspect { response: Err(error) });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<S: StoreState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size.max(1));
    (StoreClient::new(sender), receiver)
}

/// Takes the next request if it is an action.
pub async fn expect_action<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(S::Action, oneshot::Sender<Result<S::Outcome, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is an inspection.
pub async fn expect_inspect<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<oneshot::Sender<Result<S, FrameworkError>>> {
    match receiver.recv().await {
        Some(StoreRequest::Inspect { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartOutcome, CartStore, CustomerId};

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<CartStore>(10);

        let task = tokio::spawn(async move {
            client
                .dispatch(CartAction::SetCurrentCustomer(CustomerId::from("c_1")))
                .await
        });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, CartAction::SetCurrentCustomer(ref id) if id.as_str() == "c_1"));
        responder.send(Ok(CartOutcome::SetCurrentCustomer)).unwrap();

        let outcome = task.await.unwrap().unwrap();
        assert!(matches!(outcome, CartOutcome::SetCurrentCustomer));
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::<CartStore>::new();
        mock.expect_inspect().return_ok(CartStore::default());
        mock.expect_action().return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        let state = client.inspect().await.unwrap();
        assert!(state.customers().is_empty());

        let err = client.dispatch(CartAction::ClearAllCarts).await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);

        mock.verify();
    }

    #[tokio::test]
    async fn test_dropped_actor_reports_closed() {
        let (client, receiver) = create_mock_client::<CartStore>(1);
        drop(receiver);
        let err = client.dispatch(CartAction::CurrentCart).await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
        assert!(client.is_closed());
    }
}
