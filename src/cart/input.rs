//! Product-like records accepted by [`CartStore::add_product`](crate::cart::CartStore::add_product).

use crate::cart::model::ProductKey;
use crate::lenient::coerce_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product as screens hand it to the cart.
///
/// The record is schema-agnostic: identity comes from `id` or, failing that, `remoteId`;
/// the price from `price` and/or `price_unit`; the quantity from `quantity` or `qty`.
/// Every other field lands in `extra` and is copied onto the cart line.
///
/// ```rust
/// use fieldcart::cart::ProductInput;
///
/// let product: ProductInput = serde_json::from_value(serde_json::json!({
///     "remoteId": 12, "price": "4.50", "qty": 2, "name": "Cable"
/// })).unwrap();
/// assert_eq!(product.key().unwrap().as_str(), "12");
/// assert_eq!(product.resolved_quantity(), 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, rename = "remoteId", skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductInput {
    pub fn new(id: impl Into<ProductKey>) -> Self {
        Self {
            id: Some(Value::String(id.into().as_str().to_string())),
            ..Self::default()
        }
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(Value::from(price));
        self
    }

    pub fn price_unit(mut self, price_unit: f64) -> Self {
        self.price_unit = Some(Value::from(price_unit));
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(Value::from(quantity));
        self
    }

    /// Attach an arbitrary pass-through field (name, uom, image, ...).
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Product identity: `id`, else `remoteId`.
    pub fn key(&self) -> Option<ProductKey> {
        self.id
            .as_ref()
            .and_then(ProductKey::from_value)
            .or_else(|| self.remote_id.as_ref().and_then(ProductKey::from_value))
    }

    /// `quantity`, else `qty`, else 1.
    pub fn resolved_quantity(&self) -> f64 {
        present(&self.quantity)
            .or_else(|| present(&self.qty))
            .map(coerce_number)
            .unwrap_or(1.0)
    }

    /// `price` exactly as sent, without falling back to `price_unit`.
    pub fn supplied_price(&self) -> Option<f64> {
        present(&self.price).map(coerce_number)
    }

    /// `price_unit` exactly as sent, without falling back to `price`.
    pub fn supplied_price_unit(&self) -> Option<f64> {
        present(&self.price_unit).map(coerce_number)
    }

    /// Canonical unit price: `price_unit`, else `price`. `None` when neither was supplied.
    pub fn resolved_price_unit(&self) -> Option<f64> {
        present(&self.price_unit)
            .or_else(|| present(&self.price))
            .map(coerce_number)
    }

    /// Display price: `price`, else `price_unit`. `None` when neither was supplied.
    pub fn resolved_price(&self) -> Option<f64> {
        present(&self.price)
            .or_else(|| present(&self.price_unit))
            .map(coerce_number)
    }
}

// An explicit JSON null counts as "not supplied".
fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}
