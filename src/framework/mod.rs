//! Generic store runtime.
//!
//! - [`StoreState`] - Trait that a piece of state implements to be owned by an actor
//! - [`StoreActor`] - Task that owns the state and applies requests sequentially
//! - [`StoreClient`] - Cloneable handle that sends requests to the actor
//! - [`FrameworkError`] - Runtime communication errors
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning the actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::FrameworkError;
pub use message::{Response, StoreRequest};
pub use state::StoreState;
