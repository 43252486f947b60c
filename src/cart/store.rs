//! The cart reducer.

use crate::cart::input::ProductInput;
use crate::cart::model::{CartLine, CartSnapshot, CartSummary, CustomerId, ProductKey};
use crate::lenient::coerce_number;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Carts for every customer the device is serving, plus the active customer pointer.
///
/// Lines keep insertion order. Within one customer's cart a product id appears at most
/// once, and every line's subtotals are refreshed by each operation that changes it.
/// Nothing here fails: malformed numbers are coerced to `0.0` and operations that have
/// nothing to act on return `None` or `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    current_customer: Option<CustomerId>,
    carts: HashMap<CustomerId, Vec<CartLine>>,
    fallback_customer: CustomerId,
}

impl CartStore {
    /// An empty store that files products under `fallback_customer` while no customer is
    /// active.
    pub fn with_fallback_customer(fallback_customer: impl Into<CustomerId>) -> Self {
        Self {
            fallback_customer: fallback_customer.into(),
            ..Self::default()
        }
    }

    /// Rebuild a store from a snapshot. Lines are normalized as in
    /// [`load_customer_cart`](Self::load_customer_cart).
    pub fn restore(snapshot: CartSnapshot, fallback_customer: impl Into<CustomerId>) -> Self {
        let carts = snapshot
            .carts
            .into_iter()
            .map(|(customer, lines)| (customer, normalize(lines)))
            .collect();
        Self {
            current_customer: snapshot.current_customer,
            carts,
            fallback_customer: fallback_customer.into(),
        }
    }

    pub fn current_customer(&self) -> Option<&CustomerId> {
        self.current_customer.as_ref()
    }

    pub fn fallback_customer(&self) -> &CustomerId {
        &self.fallback_customer
    }

    /// Make `customer_id` the active customer. Cart contents are untouched.
    pub fn set_current_customer(&mut self, customer_id: impl Into<CustomerId>) {
        let customer_id = customer_id.into();
        debug!(customer = %customer_id, "Active customer changed");
        self.current_customer = Some(customer_id);
    }

    /// Lines of the active customer; empty when there is none or it has no cart yet.
    pub fn current_cart(&self) -> &[CartLine] {
        self.current_customer
            .as_ref()
            .map(|customer| self.cart(customer))
            .unwrap_or_default()
    }

    /// Lines of any customer.
    pub fn cart(&self, customer_id: &CustomerId) -> &[CartLine] {
        self.carts.get(customer_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Customers that currently own a cart section, sorted.
    pub fn customers(&self) -> Vec<CustomerId> {
        let mut customers: Vec<_> = self.carts.keys().cloned().collect();
        customers.sort();
        customers
    }

    /// Add a product to the active customer's cart, or to the fallback customer's when
    /// none is active (the pointer itself does not move).
    ///
    /// An existing line with the same product id takes the new quantity and any price
    /// that was supplied, and keeps its discount. A new line starts without discount.
    /// Records without an identity are ignored.
    pub fn add_product(&mut self, product: ProductInput) -> Option<CartLine> {
        let Some(key) = product.key() else {
            warn!(?product, "Product without id or remoteId ignored");
            return None;
        };
        let customer = self
            .current_customer
            .clone()
            .unwrap_or_else(|| self.fallback_customer.clone());

        let quantity = product.resolved_quantity();
        let lines = self.carts.entry(customer.clone()).or_default();

        if let Some(line) = lines.iter_mut().find(|line| line.id == key) {
            line.quantity = quantity;
            // Only the price fields the caller actually sent are overwritten.
            if let Some(price) = product.supplied_price() {
                line.price = price;
            }
            if let Some(price_unit) = product.supplied_price_unit() {
                line.price_unit = price_unit;
            }
            line.merge_extra(product.extra);
            line.recompute();
            debug!(%customer, product = %key, quantity, "Cart line updated");
            return Some(line.clone());
        }

        let mut line = CartLine::new(
            key,
            quantity,
            product.resolved_price().unwrap_or_default(),
            product.resolved_price_unit().unwrap_or_default(),
        );
        line.merge_extra(product.extra);
        debug!(%customer, product = %line.id, quantity, "Cart line added");
        lines.push(line.clone());
        Some(line)
    }

    /// Set a line's discount in the active cart and refresh its subtotals.
    ///
    /// `percent` accepts numbers or numeric strings; anything else counts as 0. The
    /// value is clamped to 0..=100. Returns `None` when the line does not exist.
    pub fn set_product_discount(
        &mut self,
        product_id: &ProductKey,
        percent: impl Into<Value>,
    ) -> Option<CartLine> {
        let percent = coerce_number(&percent.into()).clamp(0.0, 100.0);
        let line = self.current_lines_mut()?.iter_mut().find(|line| &line.id == product_id)?;
        line.discount_percent = percent;
        line.recompute();
        debug!(product = %product_id, percent, subtotal = line.price_subtotal, "Discount applied");
        Some(line.clone())
    }

    /// Remove a line from the active cart. Returns the removed line.
    pub fn remove_product(&mut self, product_id: &ProductKey) -> Option<CartLine> {
        let lines = self.current_lines_mut()?;
        let position = lines.iter().position(|line| &line.id == product_id)?;
        Some(lines.remove(position))
    }

    /// Empty the active customer's cart. Returns how many lines were dropped.
    pub fn clear_products(&mut self) -> usize {
        let Some(customer) = self.current_customer.clone() else {
            return 0;
        };
        let lines = self.carts.entry(customer).or_default();
        let removed = lines.len();
        lines.clear();
        removed
    }

    /// Replace one customer's cart with externally supplied lines and make that customer
    /// active.
    ///
    /// Duplicate product ids are merged (first position, last values) and subtotals are
    /// recomputed, so restored data cannot break the cart invariants.
    pub fn load_customer_cart(&mut self, customer_id: impl Into<CustomerId>, lines: Vec<CartLine>) {
        let customer_id = customer_id.into();
        let lines = normalize(lines);
        debug!(customer = %customer_id, lines = lines.len(), "Cart loaded");
        self.carts.insert(customer_id.clone(), lines);
        self.current_customer = Some(customer_id);
    }

    /// Forget every cart and the active customer.
    pub fn clear_all_carts(&mut self) {
        self.carts.clear();
        self.current_customer = None;
    }

    /// Totals of the active cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_lines(self.current_customer.clone(), self.current_cart())
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            current_customer: self.current_customer.clone(),
            carts: self.carts.clone(),
        }
    }

    fn current_lines_mut(&mut self) -> Option<&mut Vec<CartLine>> {
        let customer = self.current_customer.as_ref()?;
        self.carts.get_mut(customer)
    }
}

fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for mut line in lines {
        let extra = std::mem::take(&mut line.extra);
        line.merge_extra(extra);
        line.discount_percent = line.discount_percent.clamp(0.0, 100.0);
        line.recompute();
        match merged.iter_mut().find(|existing| existing.id == line.id) {
            Some(existing) => *existing = line,
            None => merged.push(line),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: &str, price: f64, quantity: f64) -> ProductInput {
        ProductInput::new(id).price(price).quantity(quantity)
    }

    #[test]
    fn test_distinct_ids_each_get_a_line() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        for id in ["1", "2", "3", "4"] {
            store.add_product(product(id, 1.0, 1.0));
        }
        assert_eq!(store.current_cart().len(), 4);
        let ids: Vec<_> = store.current_cart().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_same_id_updates_in_place() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(product("1", 10.0, 2.0));
        store.add_product(product("2", 5.0, 1.0));
        let line = store.add_product(product("1", 12.0, 5.0)).unwrap();

        assert_eq!(store.current_cart().len(), 2);
        assert_eq!(line.quantity, 5.0);
        assert_eq!(line.price, 12.0);
        assert_eq!(line.price_unit, 12.0);
        assert_eq!(line.price_subtotal, 60.0);
        assert_eq!(store.current_cart()[0].id.as_str(), "1");
    }

    #[test]
    fn test_discount_halves_subtotal() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(ProductInput::new("1").price(10.0).quantity(2.0));
        let line = store.set_product_discount(&ProductKey::from("1"), 50).unwrap();
        assert_eq!(line.price_subtotal, 10.0);
        assert_eq!(line.price_subtotal_incl, 10.0);
    }

    #[test]
    fn test_discount_matches_formula_across_range() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(ProductInput::new("x").price_unit(7.77).quantity(3.0));
        for p in [0.0_f64, 1.0, 12.5, 33.3, 50.0, 99.9, 100.0] {
            let line = store.set_product_discount(&ProductKey::from("x"), p).unwrap();
            let expected = ((7.77 * 3.0 * (1.0 - p / 100.0)) * 1000.0).round() / 1000.0;
            assert_eq!(line.price_subtotal, expected, "percent {p}");
        }
    }

    #[test]
    fn test_update_overwrites_only_supplied_price_fields() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(ProductInput::new("1").price(12.0).price_unit(10.0));

        let line = store
            .add_product(ProductInput::new("1").price_unit(8.0).quantity(2.0))
            .unwrap();
        assert_eq!(line.price, 12.0);
        assert_eq!(line.price_unit, 8.0);
        assert_eq!(line.price_subtotal, 16.0);

        let line = store.add_product(ProductInput::new("1").price(15.0)).unwrap();
        assert_eq!(line.price, 15.0);
        assert_eq!(line.price_unit, 8.0);
        assert_eq!(line.price_subtotal, 8.0);
    }

    #[test]
    fn test_line_fields_in_input_cannot_shadow_derived_values() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        let record = json!({
            "id": 1, "price": 10, "price_unit": 10, "quantity": 2,
            "discount_percent": 30, "price_subtotal": 999, "price_subtotal_incl": 999,
            "name": "Pen"
        });
        let line = store.add_product(serde_json::from_value(record.clone()).unwrap()).unwrap();
        assert_eq!(line.price_subtotal, 20.0);
        assert_eq!(line.extra.len(), 1);

        // Re-adding the same record updates in place.
        store.add_product(serde_json::from_value(record).unwrap());
        let value = serde_json::to_value(&store.current_cart()[0]).unwrap();
        assert_eq!(value["price_subtotal"], json!(20.0));
        assert_eq!(value["discount_percent"], json!(0.0));

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let snapshot: CartSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(CartStore::restore(snapshot, CustomerId::guest()), store);
    }

    #[test]
    fn test_load_customer_cart_strips_shadowing_extra_keys() {
        let mut store = CartStore::default();
        let mut line = CartLine::new("1", 1.0, 5.0, 5.0);
        line.extra.insert("price_subtotal".into(), json!(123));
        line.extra.insert("uom".into(), json!("Units"));

        store.load_customer_cart("C", vec![line]);
        let loaded = &store.current_cart()[0];
        assert_eq!(loaded.extra.len(), 1);
        assert_eq!(serde_json::to_value(loaded).unwrap()["price_subtotal"], json!(5.0));
    }

    #[test]
    fn test_discount_survives_update() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(product("1", 10.0, 1.0));
        store.set_product_discount(&ProductKey::from("1"), 20);
        let line = store.add_product(product("1", 10.0, 3.0)).unwrap();
        assert_eq!(line.discount_percent, 20.0);
        assert_eq!(line.price_subtotal, 24.0);
    }

    #[test]
    fn test_discount_coercion() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(product("1", 10.0, 1.0));
        let key = ProductKey::from("1");

        assert_eq!(store.set_product_discount(&key, "15").unwrap().discount_percent, 15.0);
        assert_eq!(store.set_product_discount(&key, "abc").unwrap().discount_percent, 0.0);
        assert_eq!(store.set_product_discount(&key, f64::NAN).unwrap().discount_percent, 0.0);
        assert_eq!(store.set_product_discount(&key, 150).unwrap().discount_percent, 100.0);
        assert_eq!(store.set_product_discount(&key, -5).unwrap().price_subtotal, 10.0);
    }

    #[test]
    fn test_discount_on_missing_line_is_noop() {
        let mut store = CartStore::default();
        assert!(store.set_product_discount(&ProductKey::from("1"), 10).is_none());
        store.set_current_customer("A");
        store.add_product(product("1", 10.0, 1.0));
        let before = store.clone();
        assert!(store.set_product_discount(&ProductKey::from("nope"), 10).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_guest_fallback_without_active_customer() {
        let mut store = CartStore::default();
        store.add_product(product("1", 2.0, 1.0)).unwrap();
        assert_eq!(store.cart(&CustomerId::guest()).len(), 1);
        assert!(store.current_customer().is_none());
        assert!(store.current_cart().is_empty());
    }

    #[test]
    fn test_custom_fallback_customer() {
        let mut store = CartStore::with_fallback_customer("walk-in");
        store.add_product(product("1", 2.0, 1.0));
        assert_eq!(store.customers(), vec![CustomerId::from("walk-in")]);
    }

    #[test]
    fn test_product_without_identity_is_ignored() {
        let mut store = CartStore::default();
        let nameless: ProductInput = serde_json::from_value(json!({"price": 3})).unwrap();
        assert!(store.add_product(nameless).is_none());
        assert!(store.customers().is_empty());
    }

    #[test]
    fn test_customers_are_isolated() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(product("p1", 1.0, 1.0));
        store.set_current_customer("B");
        store.add_product(product("p2", 1.0, 1.0));

        let a: Vec<_> = store.cart(&"A".into()).iter().map(|l| l.id.as_str()).collect();
        let b: Vec<_> = store.cart(&"B".into()).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(a, ["p1"]);
        assert_eq!(b, ["p2"]);
    }

    #[test]
    fn test_remove_and_clear_need_active_customer() {
        let mut store = CartStore::default();
        store.add_product(product("1", 1.0, 1.0));
        assert!(store.remove_product(&ProductKey::from("1")).is_none());
        assert_eq!(store.clear_products(), 0);
        assert_eq!(store.cart(&CustomerId::guest()).len(), 1);

        store.set_current_customer("A");
        store.add_product(product("1", 1.0, 1.0));
        store.add_product(product("2", 1.0, 1.0));
        assert_eq!(store.remove_product(&ProductKey::from("1")).unwrap().id.as_str(), "1");
        assert_eq!(store.current_cart().len(), 1);
        assert_eq!(store.clear_products(), 1);
        assert!(store.current_cart().is_empty());
        assert!(store.customers().contains(&CustomerId::from("A")));
    }

    #[test]
    fn test_load_customer_cart_normalizes_and_activates() {
        let mut store = CartStore::default();
        let lines: Vec<CartLine> = serde_json::from_value(json!([
            {"id": 1, "quantity": 2, "price": 5, "price_unit": 5, "discount_percent": 10, "price_subtotal": 999},
            {"id": 2, "quantity": 1, "price": 3, "price_unit": 3},
            {"id": "1", "quantity": 4, "price": 5, "price_unit": 5}
        ]))
        .unwrap();

        store.load_customer_cart("C", lines);
        assert_eq!(store.current_customer(), Some(&CustomerId::from("C")));
        let cart = store.current_cart();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].id.as_str(), "1");
        assert_eq!(cart[0].quantity, 4.0);
        assert_eq!(cart[0].price_subtotal, 20.0);
        assert_eq!(cart[1].price_subtotal, 3.0);
    }

    #[test]
    fn test_clear_all_carts_resets_everything() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(product("1", 1.0, 1.0));
        store.set_current_customer("B");
        store.add_product(product("2", 1.0, 1.0));

        store.clear_all_carts();
        assert!(store.current_cart().is_empty());
        assert!(store.current_customer().is_none());
        assert!(store.customers().is_empty());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut store = CartStore::default();
        store.set_current_customer("A");
        store.add_product(product("1", 4.0, 2.0).field("name", "Bolt"));
        store.set_product_discount(&ProductKey::from("1"), 25);

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let snapshot: CartSnapshot = serde_json::from_str(&json).unwrap();
        let restored = CartStore::restore(snapshot, CustomerId::guest());

        assert_eq!(restored, store);
        assert_eq!(restored.summary().net, 6.0);
    }
}
