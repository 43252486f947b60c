//! Messages understood by the cart actor.
//!
//! Every [`CartStore`](crate::cart::CartStore) operation has one [`CartAction`] variant
//! and one [`CartOutcome`] variant of the same name.

use crate::cart::input::ProductInput;
use crate::cart::model::{CartLine, CartSnapshot, CartSummary, CustomerId, ProductKey};
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum CartAction {
    SetCurrentCustomer(CustomerId),
    CurrentCart,
    AddProduct(ProductInput),
    SetProductDiscount { product_id: ProductKey, percent: Value },
    RemoveProduct(ProductKey),
    ClearProducts,
    LoadCustomerCart { customer_id: CustomerId, lines: Vec<CartLine> },
    ClearAllCarts,
    Cart(CustomerId),
    Customers,
    Summary,
    Snapshot,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartOutcome {
    SetCurrentCustomer,
    CurrentCart(Vec<CartLine>),
    /// `None` when the product had no identity.
    AddProduct(Option<CartLine>),
    /// `None` when the line was not found.
    SetProductDiscount(Option<CartLine>),
    RemoveProduct(Option<CartLine>),
    /// Number of lines dropped.
    ClearProducts(usize),
    LoadCustomerCart,
    ClearAllCarts,
    Cart(Vec<CartLine>),
    Customers(Vec<CustomerId>),
    Summary(CartSummary),
    Snapshot(CartSnapshot),
}

impl CartOutcome {
    /// Variant name, for error reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentCustomer => "SetCurrentCustomer",
            Self::CurrentCart(_) => "CurrentCart",
            Self::AddProduct(_) => "AddProduct",
            Self::SetProductDiscount(_) => "SetProductDiscount",
            Self::RemoveProduct(_) => "RemoveProduct",
            Self::ClearProducts(_) => "ClearProducts",
            Self::LoadCustomerCart => "LoadCustomerCart",
            Self::ClearAllCarts => "ClearAllCarts",
            Self::Cart(_) => "Cart",
            Self::Customers(_) => "Customers",
            Self::Summary(_) => "Summary",
            Self::Snapshot(_) => "Snapshot",
        }
    }
}
