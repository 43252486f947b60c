//! # Cart Client
//!
//! High-level API over the cart actor. Clone it into every screen that needs the cart.
use crate::cart::{
    CartAction, CartError, CartLine, CartOutcome, CartSnapshot, CartStore, CartSummary,
    CustomerId, ProductInput, ProductKey,
};
use crate::clients::store_client::StateClient;
use crate::framework::StoreClient;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: StoreClient<CartStore>,
}

#[async_trait]
impl StateClient<CartStore> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StoreClient<CartStore> {
        &self.inner
    }
}

// Unwraps the outcome variant that answers a given action.
macro_rules! expect_outcome {
    ($outcome:expr, $variant:ident) => {
        match $outcome {
            CartOutcome::$variant => Ok(()),
            other => Err(CartError::UnexpectedOutcome {
                expected: stringify!($variant),
                got: other.name(),
            }),
        }
    };
    ($outcome:expr, $variant:ident(_)) => {
        match $outcome {
            CartOutcome::$variant(value) => Ok(value),
            other => Err(CartError::UnexpectedOutcome {
                expected: stringify!($variant),
                got: other.name(),
            }),
        }
    };
}

impl CartClient {
    pub fn new(inner: StoreClient<CartStore>) -> Self {
        Self { inner }
    }

    async fn send(&self, action: CartAction) -> Result<CartOutcome, CartError> {
        self.inner.dispatch(action).await.map_err(CartError::from)
    }

    #[instrument(skip(self, customer_id))]
    pub async fn set_current_customer(
        &self,
        customer_id: impl Into<CustomerId>,
    ) -> Result<(), CartError> {
        let customer_id = customer_id.into();
        debug!(customer = %customer_id, "Selecting customer");
        let outcome = self.send(CartAction::SetCurrentCustomer(customer_id)).await?;
        expect_outcome!(outcome, SetCurrentCustomer)
    }

    #[instrument(skip(self))]
    pub async fn current_cart(&self) -> Result<Vec<CartLine>, CartError> {
        let outcome = self.send(CartAction::CurrentCart).await?;
        expect_outcome!(outcome, CurrentCart(_))
    }

    /// Add or update a product line. `Ok(None)` means the record had no identity.
    #[instrument(skip(self, product))]
    pub async fn add_product(&self, product: ProductInput) -> Result<Option<CartLine>, CartError> {
        debug!(?product, "add_product called");
        let outcome = self.send(CartAction::AddProduct(product)).await?;
        expect_outcome!(outcome, AddProduct(_))
    }

    /// Set a line's discount. `Ok(None)` means the line was not in the active cart.
    #[instrument(skip(self, product_id, percent))]
    pub async fn set_product_discount(
        &self,
        product_id: impl Into<ProductKey>,
        percent: impl Into<Value>,
    ) -> Result<Option<CartLine>, CartError> {
        let action = CartAction::SetProductDiscount {
            product_id: product_id.into(),
            percent: percent.into(),
        };
        let outcome = self.send(action).await?;
        expect_outcome!(outcome, SetProductDiscount(_))
    }

    #[instrument(skip(self, product_id))]
    pub async fn remove_product(
        &self,
        product_id: impl Into<ProductKey>,
    ) -> Result<Option<CartLine>, CartError> {
        let outcome = self.send(CartAction::RemoveProduct(product_id.into())).await?;
        expect_outcome!(outcome, RemoveProduct(_))
    }

    #[instrument(skip(self))]
    pub async fn clear_products(&self) -> Result<usize, CartError> {
        let outcome = self.send(CartAction::ClearProducts).await?;
        expect_outcome!(outcome, ClearProducts(_))
    }

    #[instrument(skip(self, customer_id, lines))]
    pub async fn load_customer_cart(
        &self,
        customer_id: impl Into<CustomerId>,
        lines: Vec<CartLine>,
    ) -> Result<(), CartError> {
        let action = CartAction::LoadCustomerCart {
            customer_id: customer_id.into(),
            lines,
        };
        let outcome = self.send(action).await?;
        expect_outcome!(outcome, LoadCustomerCart)
    }

    #[instrument(skip(self))]
    pub async fn clear_all_carts(&self) -> Result<(), CartError> {
        let outcome = self.send(CartAction::ClearAllCarts).await?;
        expect_outcome!(outcome, ClearAllCarts)
    }

    #[instrument(skip(self, customer_id))]
    pub async fn cart(&self, customer_id: impl Into<CustomerId>) -> Result<Vec<CartLine>, CartError> {
        let outcome = self.send(CartAction::Cart(customer_id.into())).await?;
        expect_outcome!(outcome, Cart(_))
    }

    #[instrument(skip(self))]
    pub async fn customers(&self) -> Result<Vec<CustomerId>, CartError> {
        let outcome = self.send(CartAction::Customers).await?;
        expect_outcome!(outcome, Customers(_))
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<CartSummary, CartError> {
        let outcome = self.send(CartAction::Summary).await?;
        expect_outcome!(outcome, Summary(_))
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        let outcome = self.send(CartAction::Snapshot).await?;
        expect_outcome!(outcome, Snapshot(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockStore};
    use crate::framework::FrameworkError;

    #[tokio::test]
    async fn test_add_product_sends_action_and_returns_line() {
        let (client, mut receiver) = create_mock_client::<CartStore>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move {
            cart_client
                .add_product(ProductInput::new("p_1").price(4.0))
                .await
        });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        match action {
            CartAction::AddProduct(product) => {
                assert_eq!(product.key(), Some(ProductKey::from("p_1")))
            }
            other => panic!("Expected AddProduct action, got {other:?}"),
        }
        responder
            .send(Ok(CartOutcome::AddProduct(Some(CartLine::new("p_1", 1.0, 4.0, 4.0)))))
            .unwrap();

        let line = task.await.unwrap().unwrap().unwrap();
        assert_eq!(line.price_subtotal, 4.0);
    }

    #[tokio::test]
    async fn test_set_product_discount_passes_raw_percent() {
        let (client, mut receiver) = create_mock_client::<CartStore>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move { cart_client.set_product_discount("p_1", "12.5").await });

        let (action, responder) = expect_action(&mut receiver).await.unwrap();
        match action {
            CartAction::SetProductDiscount { product_id, percent } => {
                assert_eq!(product_id.as_str(), "p_1");
                assert_eq!(percent, serde_json::json!("12.5"));
            }
            other => panic!("Expected SetProductDiscount action, got {other:?}"),
        }
        responder.send(Ok(CartOutcome::SetProductDiscount(None))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_mismatched_outcome_is_reported() {
        let mut mock = MockStore::<CartStore>::new();
        mock.expect_action().return_ok(CartOutcome::ClearAllCarts);

        let cart_client = CartClient::new(mock.client());
        let err = cart_client.summary().await.unwrap_err();
        assert_eq!(
            err,
            CartError::UnexpectedOutcome {
                expected: "Summary",
                got: "ClearAllCarts"
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_framework_errors_map_to_cart_errors() {
        let mut mock = MockStore::<CartStore>::new();
        mock.expect_action().return_err(FrameworkError::ActorDropped);

        let cart_client = CartClient::new(mock.client());
        let err = cart_client.clear_products().await.unwrap_err();
        assert!(matches!(err, CartError::ActorCommunicationError(ref msg) if msg.contains("dropped")));
    }

    #[tokio::test]
    async fn test_inspect_via_state_client() {
        let mut mock = MockStore::<CartStore>::new();
        let mut store = CartStore::default();
        store.set_current_customer("A");
        mock.expect_inspect().return_ok(store);

        let cart_client = CartClient::new(mock.client());
        let state = cart_client.inspect().await.unwrap();
        assert_eq!(state.current_customer(), Some(&CustomerId::from("A")));
        mock.verify();
    }
}
