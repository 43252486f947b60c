//! # fieldcart
//!
//! Shared client-side state for a field sales and service app running against an ERP
//! backend: per-customer shopping carts and paginated list fetching.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! A generic store runtime. [`StoreActor`](framework::StoreActor) owns one piece of state in
//! its own Tokio task and applies actions sequentially;
//! [`StoreClient`](framework::StoreClient) is the cloneable handle callers hold.
//!
//! ### 2. The Cart ([`cart`])
//! [`CartStore`](cart::CartStore) keeps one cart per customer, the active customer
//! pointer, and discount-aware subtotals. It runs inside a `StoreActor`.
//!
//! ### 3. The Interface ([`clients`])
//! [`CartClient`](clients::CartClient) wraps the generic client with one typed method per
//! cart operation.
//!
//! ### 4. Lists ([`pagination`])
//! [`Paginator`](pagination::Paginator) loads a first page and then more on demand from
//! any [`PageSource`](pagination::PageSource).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`AppSystem`](lifecycle::AppSystem) starts the actors from an
//! [`AppConfig`](config::AppConfig) and shuts them down.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lenient;
pub mod lifecycle;
pub mod pagination;
