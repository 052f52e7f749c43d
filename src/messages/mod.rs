use tokio::sync::oneshot;

use crate::domain::{Cart, ProductId};
use crate::error::CartError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Arguments of an amount change requested by the UI.
///
/// `amount` is signed: zero or negative requests are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// What a mutation did to the cart.
///
/// User-facing failures are reported through the notifier; this value lets
/// programmatic callers see the same result.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The cart changed and was persisted; carries the new cart.
    Applied(Cart),
    /// Nothing to do (non-positive amount, unknown product on update).
    Ignored,
    /// Refused or failed; the cart is unchanged.
    Rejected(CartError),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }
}

/// Typed messages for the cart actor. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<MutationOutcome, CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<MutationOutcome, CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<MutationOutcome, CartError>,
    },
    Shutdown,
    #[cfg(test)]
    GetInternalCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
}
