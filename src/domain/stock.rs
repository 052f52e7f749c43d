use serde::{Deserialize, Serialize};

use super::ProductId;

/// Available inventory for a product, as reported by the stock endpoint.
///
/// The endpoint identifies the product by path, so `id` is optional in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub amount: u32,
}

impl Stock {
    pub fn new(id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            id: Some(id.into()),
            amount,
        }
    }

    /// Whether `requested` units can be put in the cart.
    pub fn covers(&self, requested: u64) -> bool {
        u64::from(self.amount) >= requested
    }
}
