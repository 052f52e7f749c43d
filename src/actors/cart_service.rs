use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::CartClient;
use crate::domain::{Cart, Product, ProductId};
use crate::error::CartError;
use crate::messages::{CartRequest, MutationOutcome, ServiceResponse, UpdateProductAmount};
use crate::notify::{self, Notifier};
use crate::services::{CatalogService, StockService};
use crate::storage::{self, CartStorage, CART_STORAGE_KEY};

/// External collaborators the cart actor depends on.
#[derive(Clone)]
pub struct CartCollaborators {
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn CatalogService>,
    pub storage: Arc<dyn CartStorage>,
    pub notifier: Arc<dyn Notifier>,
}

/// Single writer of the cart.
///
/// Requests are handled one at a time, network awaits included, so every
/// mutation starts from the cart left by the previous one. Readers observe
/// the cart through the watch channel without going through the mailbox.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    published: watch::Sender<Cart>,
    stock: Arc<dyn StockService>,
    catalog: Arc<dyn CatalogService>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn Notifier>,
}

impl CartService {
    /// Restores the persisted cart and wires the mailbox.
    pub fn new(buffer_size: usize, collaborators: CartCollaborators) -> (Self, CartClient) {
        let cart = storage::load_cart(collaborators.storage.as_ref(), CART_STORAGE_KEY);
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (published, observed) = watch::channel(cart.clone());

        let service = Self {
            receiver,
            cart,
            published,
            stock: collaborators.stock,
            catalog: collaborators.catalog,
            storage: collaborators.storage,
            notifier: collaborators.notifier,
        };
        let client = CartClient::new(sender, observed);
        (service, client)
    }

    /// Main actor loop. Stops on `Shutdown` or once every client is dropped.
    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { product_id, respond_to } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    self.handle_update_product_amount(update, respond_to).await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
                #[cfg(test)]
                CartRequest::GetInternalCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_add_product(
        &mut self,
        product_id: ProductId,
        respond_to: ServiceResponse<MutationOutcome, CartError>,
    ) {
        debug!("Processing add_product request");

        let result = match self.plan_add(product_id).await {
            Ok(next) => self.commit(next).map(Some),
            Err(e) => Err(e),
        };

        let outcome = self.settle(result, notify::ADD_PRODUCT_FAILED);
        let _ = respond_to.send(Ok(outcome));
    }

    /// Sync handler: removal needs no external lookups.
    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    fn handle_remove_product(
        &mut self,
        product_id: ProductId,
        respond_to: ServiceResponse<MutationOutcome, CartError>,
    ) {
        debug!("Processing remove_product request");

        let mut next = self.cart.clone();
        let result = match next.remove(product_id) {
            Some(_) => self.commit(next).map(Some),
            None => Err(CartError::NotInCart(product_id)),
        };

        let outcome = self.settle(result, notify::REMOVE_PRODUCT_FAILED);
        let _ = respond_to.send(Ok(outcome));
    }

    #[instrument(
        fields(product_id = %update.product_id, amount = update.amount),
        skip(self, update, respond_to)
    )]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
        respond_to: ServiceResponse<MutationOutcome, CartError>,
    ) {
        debug!("Processing update_product_amount request");

        let result = match self.plan_update(update).await {
            Ok(Some(next)) => self.commit(next).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        let outcome = self.settle(result, notify::UPDATE_AMOUNT_FAILED);
        let _ = respond_to.send(Ok(outcome));
    }

    /// Computes the cart after adding one unit of `product_id`.
    async fn plan_add(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let in_cart = self.cart.get(product_id).map(|item| item.amount).unwrap_or(0);
        let desired = u64::from(in_cart) + 1;

        let stock = self
            .stock
            .stock(product_id)
            .await
            .inspect_err(|e| error!(error = %e, "Stock lookup failed"))?;

        if !stock.covers(desired) {
            return Err(CartError::OutOfStock {
                requested: desired,
                available: stock.amount,
            });
        }

        let mut next = self.cart.clone();
        if next.increment(product_id).is_none() {
            let details = self
                .catalog
                .product(product_id)
                .await
                .inspect_err(|e| error!(error = %e, "Catalog lookup failed"))?;
            next.push(Product::from_details(details, 1))?;
        }
        Ok(next)
    }

    /// Computes the cart after an amount change. `None` means nothing to do.
    async fn plan_update(&self, update: UpdateProductAmount) -> Result<Option<Cart>, CartError> {
        if update.amount <= 0 {
            debug!("Non-positive amount, ignoring");
            return Ok(None);
        }
        let requested = update.amount.unsigned_abs();

        let stock = self
            .stock
            .stock(update.product_id)
            .await
            .inspect_err(|e| error!(error = %e, "Stock lookup failed"))?;

        let amount = match u32::try_from(requested) {
            Ok(amount) if stock.covers(requested) => amount,
            _ => {
                return Err(CartError::OutOfStock {
                    requested,
                    available: stock.amount,
                })
            }
        };

        let mut next = self.cart.clone();
        if !next.set_amount(update.product_id, amount) {
            debug!("Product not in cart, nothing to update");
            return Ok(None);
        }
        Ok(Some(next))
    }

    /// Persists `next`, then makes it the current cart and publishes it.
    ///
    /// A failed write leaves the current cart untouched.
    fn commit(&mut self, next: Cart) -> Result<Cart, CartError> {
        storage::save_cart(self.storage.as_ref(), CART_STORAGE_KEY, &next)?;
        self.cart = next.clone();
        self.published.send_replace(next.clone());
        info!(items = next.len(), "Cart updated");
        Ok(next)
    }

    /// Turns a handler result into an outcome, notifying the user on failure.
    fn settle(&self, result: Result<Option<Cart>, CartError>, failure_message: &str) -> MutationOutcome {
        match result {
            Ok(Some(cart)) => MutationOutcome::Applied(cart),
            Ok(None) => MutationOutcome::Ignored,
            Err(e) => {
                if e.is_rejection() {
                    warn!(error = %e, "Cart mutation rejected");
                } else {
                    error!(error = %e, "Cart mutation failed");
                }
                let message = match &e {
                    CartError::OutOfStock { .. } => notify::OUT_OF_STOCK,
                    _ => failure_message,
                };
                self.notifier.error(message);
                MutationOutcome::Rejected(e)
            }
        }
    }
}
