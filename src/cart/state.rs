//! [`StoreState`] implementation for [`CartStore`], so the cart can be owned by a
//! [`StoreActor`](crate::framework::StoreActor).

use crate::cart::actions::{CartAction, CartOutcome};
use crate::cart::store::CartStore;
use crate::framework::StoreState;
use async_trait::async_trait;

#[async_trait]
impl StoreState for CartStore {
    type Action = CartAction;
    type Outcome = CartOutcome;
    type Context = ();

    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> CartOutcome {
        match action {
            CartAction::SetCurrentCustomer(customer_id) => {
                self.set_current_customer(customer_id);
                CartOutcome::SetCurrentCustomer
            }
            CartAction::CurrentCart => CartOutcome::CurrentCart(self.current_cart().to_vec()),
            CartAction::AddProduct(product) => CartOutcome::AddProduct(self.add_product(product)),
            CartAction::SetProductDiscount { product_id, percent } => {
                CartOutcome::SetProductDiscount(self.set_product_discount(&product_id, percent))
            }
            CartAction::RemoveProduct(product_id) => {
                CartOutcome::RemoveProduct(self.remove_product(&product_id))
            }
            CartAction::ClearProducts => CartOutcome::ClearProducts(self.clear_products()),
            CartAction::LoadCustomerCart { customer_id, lines } => {
                self.load_customer_cart(customer_id, lines);
                CartOutcome::LoadCustomerCart
            }
            CartAction::ClearAllCarts => {
                self.clear_all_carts();
                CartOutcome::ClearAllCarts
            }
            CartAction::Cart(customer_id) => CartOutcome::Cart(self.cart(&customer_id).to_vec()),
            CartAction::Customers => CartOutcome::Customers(self.customers()),
            CartAction::Summary => CartOutcome::Summary(self.summary()),
            CartAction::Snapshot => CartOutcome::Snapshot(self.snapshot()),
        }
    }

    fn size(&self) -> usize {
        self.customers().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CustomerId, ProductInput};

    #[tokio::test]
    async fn test_actions_map_onto_store_operations() {
        let mut store = CartStore::default();
        store
            .handle_action(CartAction::SetCurrentCustomer(CustomerId::from("A")), &())
            .await;
        let added = store
            .handle_action(
                CartAction::AddProduct(ProductInput::new("1").price(10.0).quantity(2.0)),
                &(),
            )
            .await;
        assert!(matches!(added, CartOutcome::AddProduct(Some(ref line)) if line.price_subtotal == 20.0));

        let discounted = store
            .handle_action(
                CartAction::SetProductDiscount {
                    product_id: "1".into(),
                    percent: serde_json::json!(50),
                },
                &(),
            )
            .await;
        assert!(matches!(discounted, CartOutcome::SetProductDiscount(Some(ref line)) if line.price_subtotal == 10.0));

        match store.handle_action(CartAction::CurrentCart, &()).await {
            CartOutcome::CurrentCart(lines) => assert_eq!(lines.len(), 1),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(store.size(), 1);
    }
}
