//! # StoreState Trait
//!
//! The `StoreState` trait is the contract a piece of application state implements to be
//! owned by a [`StoreActor`](crate::framework::StoreActor). It is a reducer: every change
//! to the state arrives as an `Action`, and every action produces an `Outcome`.
//!
//! # Architecture Note
//! Screens never hold the state itself. They hold a cloneable client and send actions to
//! the one task that owns the state, so the same store can be shared by many callers
//! without a global singleton and without locks around the state.
//!
//! # Provided Methods (Hooks)
//! - [`StoreState::on_start`]
//! - [`StoreState::size`]
//!
//! Both have default implementations.

use async_trait::async_trait;
use std::fmt::Debug;

/// State that can be owned and driven by a `StoreActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await (e.g. restore from another service).
/// `Context` is injected into every hook when the actor starts running, which keeps
/// dependencies out of the state's constructor.
#[async_trait]
pub trait StoreState: Clone + Send + Sync + 'static {
    /// Enum of every operation the state supports.
    type Action: Send + Sync + Debug;

    /// Result of applying an action. Usually an enum mirroring `Action` 1:1.
    type Outcome: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Called once, before the first action is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) {}

    /// Apply one action and report what happened.
    async fn handle_action(&mut self, action: Self::Action, ctx: &Self::Context) -> Self::Outcome;

    /// Number of top-level entries, reported in lifecycle logs.
    fn size(&self) -> usize {
        0
    }
}
