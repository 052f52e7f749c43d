use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{Cart, ProductId};
use crate::error::CartError;
use crate::messages::{CartRequest, MutationOutcome, UpdateProductAmount};

/// Consumer handle of the cart: reads the published cart, sends mutations to
/// the cart actor. Cheap to clone; every clone talks to the same actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    observed: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, observed: watch::Receiver<Cart>) -> Self {
        Self { sender, observed }
    }

    /// Snapshot of the latest published cart.
    pub fn cart(&self) -> Cart {
        self.observed.borrow().clone()
    }

    /// Receiver notified every time a mutation is applied.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        let mut receiver = self.observed.clone();
        receiver.mark_unchanged();
        receiver
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CartClient => fn add_product(product_id: ProductId) -> MutationOutcome as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> MutationOutcome as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> MutationOutcome as CartRequest::UpdateProductAmount, Error = CartError);

// Test-only access to the actor's own copy of the cart
#[cfg(test)]
client_method!(CartClient => fn get_internal_cart() -> Cart as CartRequest::GetInternalCart, Error = CartError);
