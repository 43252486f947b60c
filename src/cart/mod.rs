//! # Cart Store
//!
//! Per-customer shopping carts for the point-of-sale and order-taking screens.
//!
//! ## Structure
//!
//! - [`store`] - [`CartStore`], the reducer that owns every cart
//! - [`model`] - [`CartLine`], [`CustomerId`], [`ProductKey`], [`CartSummary`], [`CartSnapshot`]
//! - [`input`] - [`ProductInput`], the schema-agnostic record screens add
//! - [`actions`] - [`CartAction`] / [`CartOutcome`] messages for the actor
//! - [`error`] - [`CartError`] for the client side
//! - [`new()`] - Factory that creates the actor and its [`CartClient`]
//!
//! ## Usage
//!
//! ```rust
//! use fieldcart::cart::{self, ProductInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = cart::new(cart::CartConfig::default());
//!     tokio::spawn(actor.run(()));
//!
//!     client.set_current_customer("cust_17").await?;
//!     client.add_product(ProductInput::new("p_1").price(10.0).quantity(2.0)).await?;
//!     let line = client.set_product_discount("p_1", 50).await?.unwrap();
//!     assert_eq!(line.price_subtotal, 10.0);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod error;
pub mod input;
pub mod model;
pub mod state;
pub mod store;

pub use actions::*;
pub use error::*;
pub use input::ProductInput;
pub use model::*;
pub use store::CartStore;

use crate::clients::CartClient;
use crate::framework::StoreActor;

/// Settings for a cart actor.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Channel capacity between clients and the actor.
    pub buffer_size: usize,
    /// Customer that receives products while none is active.
    pub fallback_customer: CustomerId,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            fallback_customer: CustomerId::guest(),
        }
    }
}

/// Creates a new cart actor and its client.
pub fn new(config: CartConfig) -> (StoreActor<CartStore>, CartClient) {
    let store = CartStore::with_fallback_customer(config.fallback_customer);
    let (actor, generic_client) = StoreActor::new(store, config.buffer_size);
    (actor, CartClient::new(generic_client))
}
