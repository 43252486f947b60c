use crate::cart;
use crate::clients::CartClient;
use crate::config::AppConfig;
use crate::pagination::{PageSource, Paginator};
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}

/// Runtime orchestrator for the application's shared state.
///
/// `AppSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the store actors
/// - **Dependency Wiring**: handing out clients that screens receive explicitly
/// - **Defaults**: building paginators with the configured page size
///
/// # Example
///
/// ```ignore
/// let system = AppSystem::new(&AppConfig::from_env()?);
///
/// system.cart_client.set_current_customer("cust_17").await?;
/// let leads = system.paginator(lead_source);
/// leads.fetch_data(Filters::new().with("stage", "new")).await?;
///
/// system.shutdown().await?;
/// ```
pub struct AppSystem {
    /// Client for the cart actor
    pub cart_client: CartClient,

    page_limit: usize,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl AppSystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let (cart_actor, cart_client) = cart::new(config.cart());
        let cart_handle = tokio::spawn(cart_actor.run(()));
        info!(page_limit = config.page_limit, "System started");

        Self {
            cart_client,
            page_limit: config.page_limit,
            handles: vec![cart_handle],
        }
    }

    /// A paginator over `source` using the configured default page size.
    pub fn paginator<S: PageSource>(&self, source: S) -> Paginator<S> {
        Paginator::with_default_limit(source, self.page_limit)
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the channels; each actor then leaves its loop. Clones
    /// of a client still held elsewhere keep their actor alive, so this waits for them
    /// too.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
