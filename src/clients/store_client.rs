//! # StateClient Trait
//!
//! Common interface for domain clients wrapping a [`StoreClient`].

use crate::framework::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;

/// Trait for domain clients that wrap a generic `StoreClient`.
///
/// Implementors provide the inner client and an error mapping; `dispatch` and
/// `inspect` come for free with tracing and error conversion applied.
#[async_trait]
pub trait StateClient<S: StoreState>: Send + Sync {
    /// The domain-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Send a raw action.
    #[tracing::instrument(skip(self))]
    async fn dispatch(&self, action: S::Action) -> Result<S::Outcome, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().dispatch(action).await.map_err(Self::Error::from)
    }

    /// Fetch a copy of the whole state.
    #[tracing::instrument(skip(self))]
    async fn inspect(&self) -> Result<S, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().inspect().await.map_err(Self::Error::from)
    }
}
