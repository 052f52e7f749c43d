use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{CatalogService, StockService};
use crate::domain::{ProductDetails, ProductId, Stock};
use crate::error::ServiceError;

/// Stock and catalog client for the storefront REST backend
/// (`GET {base}/stock/{id}`, `GET {base}/products/{id}`).
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| ServiceError::Invalid(format!("bad base url {base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, product_id)
    }

    async fn get_body(&self, url: String) -> Result<String, ServiceError> {
        debug!(%url, "Sending request");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Backend answered with an error status");
            return Err(ServiceError::Status { status: status.as_u16(), url });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl StockService for HttpApi {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock(&self, product_id: ProductId) -> Result<Stock, ServiceError> {
        let body = self.get_body(self.url("stock", product_id)).await?;
        decode_stock(product_id, &body)
    }
}

#[async_trait]
impl CatalogService for HttpApi {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product(&self, product_id: ProductId) -> Result<ProductDetails, ServiceError> {
        let body = self.get_body(self.url("products", product_id)).await?;
        decode_product(product_id, &body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Parses a stock body for `requested`. A body naming another product is refused.
pub fn decode_stock(requested: ProductId, body: &str) -> Result<Stock, ServiceError> {
    let stock: Stock = decode(body)?;
    match stock.id {
        Some(id) if id != requested => Err(ServiceError::Invalid(format!(
            "stock for product {id} returned for product {requested}"
        ))),
        _ => Ok(Stock {
            id: Some(requested),
            amount: stock.amount,
        }),
    }
}

/// Parses and validates a catalog body for `requested`.
pub fn decode_product(requested: ProductId, body: &str) -> Result<ProductDetails, ServiceError> {
    let details: ProductDetails = decode(body)?;
    if details.id != requested {
        return Err(ServiceError::Invalid(format!(
            "product {} returned for product {requested}",
            details.id
        )));
    }
    if details.title.trim().is_empty() {
        return Err(ServiceError::Invalid(format!("product {requested} has no title")));
    }
    if !details.price.is_finite() || details.price < 0.0 {
        return Err(ServiceError::Invalid(format!(
            "product {requested} has invalid price {}",
            details.price
        )));
    }
    Ok(details)
}
