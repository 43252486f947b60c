//! Demo: two customers' carts and a paged product list.

use fieldcart::cart::ProductInput;
use fieldcart::config::AppConfig;
use fieldcart::lifecycle::tracing::setup_tracing;
use fieldcart::lifecycle::AppSystem;
use fieldcart::pagination::{Filters, VecSource};
use serde_json::json;
use tracing::{info, Instrument};

#[derive(Debug, Clone)]
struct Product {
    id: u32,
    name: String,
    price: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(?config, "Starting application");

    let system = AppSystem::new(&config);

    let catalog: Vec<Product> = (1..=120)
        .map(|id| Product {
            id,
            name: format!("Item {id:03}"),
            price: 1.5 * f64::from(id),
        })
        .collect();
    let products = system.paginator(VecSource::new(catalog));

    let span = tracing::info_span!("product_list");
    async {
        products.fetch_data(Filters::new()).await?;
        while !products.all_data_loaded() {
            products.fetch_more_data(Filters::new()).await?;
        }
        info!(loaded = products.len(), "Catalog loaded");
        Ok::<_, fieldcart::pagination::PaginationError>(())
    }
    .instrument(span)
    .await?;

    let cart = system.cart_client.clone();
    let span = tracing::info_span!("order_taking");
    async {
        let catalog = products.data();
        cart.set_current_customer("cust_A").await?;
        for product in catalog.iter().take(3) {
            let input = ProductInput::new(u64::from(product.id))
                .price(product.price)
                .quantity(2.0)
                .field("name", json!(product.name));
            cart.add_product(input).await?;
        }
        cart.set_product_discount(2u64, 50).await?;

        cart.set_current_customer("cust_B").await?;
        if let Some(product) = catalog.last() {
            cart.add_product(ProductInput::new(u64::from(product.id)).price(product.price))
                .await?;
        }

        cart.set_current_customer("cust_A").await?;
        let summary = cart.summary().await?;
        info!(?summary, "Cart summary");
        Ok::<_, fieldcart::cart::CartError>(())
    }
    .instrument(span)
    .await?;

    drop(cart);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
