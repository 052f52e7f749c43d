//! Remote collaborators of the cart: live stock levels and catalog details.

mod http;

pub use http::*;

use async_trait::async_trait;

use crate::domain::{ProductDetails, ProductId, Stock};
use crate::error::ServiceError;

/// Answers how many units of a product are available. Never cached.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, ServiceError>;
}

/// Answers the full catalog details of a product.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn product(&self, product_id: ProductId) -> Result<ProductDetails, ServiceError>;
}
