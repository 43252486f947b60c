//! Type-safe wrappers around [`StoreClient`](crate::framework::StoreClient).

pub mod cart_client;
pub mod store_client;

pub use cart_client::*;
pub use store_client::*;
