use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actors::{CartCollaborators, CartService};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::error::ServiceError;
use crate::notify::Notifier;
use crate::services::HttpApi;
use crate::storage::FileStorage;

/// Owns the cart actor task for one session.
///
/// Construct once, hand `cart_client` clones to consumers, and call
/// [`CartSystem::shutdown`] when the session ends.
pub struct CartSystem {
    pub cart_client: CartClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Starts the cart actor. Must be called inside a Tokio runtime.
    #[instrument(name = "cart_system", skip(collaborators))]
    pub fn new(mailbox_size: usize, collaborators: CartCollaborators) -> Self {
        info!("Starting cart system");

        let (cart_service, cart_client) = CartService::new(mailbox_size, collaborators);
        let handle = tokio::spawn(cart_service.run());

        info!("Cart system started successfully");
        Self { cart_client, handle }
    }

    /// Wires the HTTP backend and file storage described by `config`.
    pub fn from_config(config: &CartConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ServiceError> {
        let api = Arc::new(HttpApi::new(&config.api_url, config.request_timeout)?);
        let collaborators = CartCollaborators {
            stock: api.clone(),
            catalog: api,
            storage: Arc::new(FileStorage::new(&config.storage_path)),
            notifier,
        };
        Ok(Self::new(config.mailbox_size, collaborators))
    }

    /// Stops the actor after it drains requests already queued, then waits for it.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system");

        let _ = self.cart_client.shutdown().await;

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(format!("Cart actor task failed: {e:?}"));
        }

        info!("Cart system shutdown complete");
        Ok(())
    }
}
