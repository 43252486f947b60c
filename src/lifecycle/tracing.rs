//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole crate.
//!
//! The format is compact and hides the module prefix (`with_target(false)`); the store
//! actor tags its lines with `state_type` instead. Levels come from `RUST_LOG`:
//!
//! ```bash
//! # Lifecycle and page loads
//! RUST_LOG=info cargo run
//!
//! # Every cart action and outcome, every page query
//! RUST_LOG=debug cargo run
//!
//! # Only the paginator
//! RUST_LOG=fieldcart::pagination=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a cart update reads:
//!
//! ```text
//! DEBUG add_product: add_product called product=ProductInput { id: Some(String("p_1")), .. }
//! DEBUG Action state_type="CartStore" action=AddProduct(..)
//! DEBUG Cart line added customer=cust_17 product=p_1 quantity=2.0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use state_type instead
        .compact()
        .init();
}
