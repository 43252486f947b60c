//! Cart data types.

use crate::lenient::{self, round3};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Display;

/// Customer id used when a product is added before any customer was selected.
pub const GUEST_CUSTOMER_ID: &str = "guest";

/// Identifier of a cart owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The walk-in customer that receives products while no customer is active.
    pub fn guest() -> Self {
        Self(GUEST_CUSTOMER_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::guest()
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CustomerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product identity within a cart.
///
/// Backends send ids as numbers or strings; both normalize to the same key, so `7` and
/// `"7"` address the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build a key from a JSON id. Empty strings and non-scalar values have no identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            Value::Number(n) => Some(Self(number_key(n))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// `7`, `7.0` and `"7"` must all land on the same line.
fn number_key(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

impl<'de> Deserialize<'de> for ProductKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| de::Error::custom("product id must be a non-empty string or a number"))
    }
}

impl From<&str> for ProductKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductKey {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductKey {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keys a cart line owns as typed fields. They never live in [`CartLine::extra`].
pub const LINE_FIELDS: [&str; 7] = [
    "id",
    "quantity",
    "price",
    "price_unit",
    "discount_percent",
    "price_subtotal",
    "price_subtotal_incl",
];

/// One product entry in a customer's cart.
///
/// `price_subtotal` and `price_subtotal_incl` are derived; call [`CartLine::recompute`]
/// after touching `quantity`, `price_unit` or `discount_percent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductKey,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    /// Display price.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
    /// Canonical unit price, the base of every subtotal.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_unit: f64,
    /// 0 to 100.
    #[serde(default, deserialize_with = "lenient::number")]
    pub discount_percent: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_subtotal: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_subtotal_incl: f64,
    /// Any other product fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartLine {
    /// A fresh line with no discount.
    pub fn new(id: impl Into<ProductKey>, quantity: f64, price: f64, price_unit: f64) -> Self {
        let mut line = Self {
            id: id.into(),
            quantity,
            price,
            price_unit,
            discount_percent: 0.0,
            price_subtotal: 0.0,
            price_subtotal_incl: 0.0,
            extra: Map::new(),
        };
        line.recompute();
        line
    }

    /// Copy pass-through fields onto the line, skipping any that shadow typed fields.
    pub fn merge_extra(&mut self, extra: Map<String, Value>) {
        self.extra.extend(
            extra
                .into_iter()
                .filter(|(key, _)| !LINE_FIELDS.contains(&key.as_str())),
        );
    }

    /// Undiscounted amount: `price_unit * quantity`.
    pub fn gross(&self) -> f64 {
        round3(self.price_unit * self.quantity)
    }

    /// Refresh both subtotals from `price_unit`, `quantity` and `discount_percent`.
    pub fn recompute(&mut self) {
        let subtotal = round3(self.price_unit * self.quantity * (1.0 - self.discount_percent / 100.0));
        self.price_subtotal = subtotal;
        self.price_subtotal_incl = subtotal;
    }
}

/// Totals for one customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub customer: Option<CustomerId>,
    pub lines: usize,
    pub quantity: f64,
    /// Sum of `price_unit * quantity`.
    pub gross: f64,
    /// `gross - net`.
    pub discount: f64,
    /// Sum of `price_subtotal`.
    pub net: f64,
}

impl CartSummary {
    pub fn from_lines(customer: Option<CustomerId>, lines: &[CartLine]) -> Self {
        let gross = round3(lines.iter().map(CartLine::gross).sum());
        let net = round3(lines.iter().map(|line| line.price_subtotal).sum());
        Self {
            customer,
            lines: lines.len(),
            quantity: round3(lines.iter().map(|line| line.quantity).sum()),
            gross,
            discount: round3(gross - net),
            net,
        }
    }
}

/// Serializable image of a whole cart store, for callers that persist carts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub current_customer: Option<CustomerId>,
    #[serde(default)]
    pub carts: HashMap<CustomerId, Vec<CartLine>>,
}
