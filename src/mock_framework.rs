//! # Mock Framework
//!
//! Test doubles for the cart's collaborators.
//!
//! - [`FakeBackend`] answers stock and catalog lookups from tables the test fills in.
//! - [`create_mock_backend`] returns a backend whose every lookup arrives on a
//!   channel; the test answers it with [`expect_stock`] / [`expect_product`],
//!   which lets it decide when (and whether) a network call completes.
//! - [`FailingStorage`] refuses writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::actors::{CartCollaborators, CartService};
use crate::clients::CartClient;
use crate::domain::{ProductDetails, ProductId, Stock};
use crate::error::{ServiceError, StorageError};
use crate::notify::{ChannelNotifier, Notification};
use crate::services::{CatalogService, StockService};
use crate::storage::{CartStorage, MemoryStorage};

// =============================================================================
// Scripted backend
// =============================================================================

/// Stock and catalog tables. Unknown ids answer with a 404-style fault.
#[derive(Clone, Default)]
pub struct FakeBackend {
    stock: Arc<Mutex<HashMap<ProductId, u32>>>,
    catalog: Arc<Mutex<HashMap<ProductId, ProductDetails>>>,
    stock_calls: Arc<AtomicUsize>,
    catalog_calls: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a catalog product with the given stock.
    pub fn with_product(self, id: u64, stock: u32) -> Self {
        let details = ProductDetails::new(id, format!("Tênis {id}"), 100.0 + id as f64, format!("https://img/{id}.jpg"));
        self.catalog.lock().unwrap().insert(ProductId(id), details);
        self.set_stock(id, stock);
        self
    }

    pub fn set_stock(&self, id: u64, amount: u32) {
        self.stock.lock().unwrap().insert(ProductId(id), amount);
    }

    pub fn details(&self, id: u64) -> ProductDetails {
        self.catalog.lock().unwrap()[&ProductId(id)].clone()
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }
}

fn not_found(resource: &str, id: ProductId) -> ServiceError {
    ServiceError::Status {
        status: 404,
        url: format!("http://fake/{resource}/{id}"),
    }
}

#[async_trait]
impl StockService for FakeBackend {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, ServiceError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        let amount = self.stock.lock().unwrap().get(&product_id).copied();
        amount
            .map(|amount| Stock::new(product_id, amount))
            .ok_or_else(|| not_found("stock", product_id))
    }
}

#[async_trait]
impl CatalogService for FakeBackend {
    async fn product(&self, product_id: ProductId) -> Result<ProductDetails, ServiceError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let details = self.catalog.lock().unwrap().get(&product_id).cloned();
        details.ok_or_else(|| not_found("products", product_id))
    }
}

// =============================================================================
// Channel-backed backend
// =============================================================================

pub type BackendResponder<T> = oneshot::Sender<Result<T, ServiceError>>;

/// A lookup made by the cart, waiting for the test to answer it.
#[derive(Debug)]
pub enum BackendRequest {
    Stock {
        product_id: ProductId,
        respond_to: BackendResponder<Stock>,
    },
    Product {
        product_id: ProductId,
        respond_to: BackendResponder<ProductDetails>,
    },
}

#[derive(Clone)]
pub struct MockBackend {
    sender: mpsc::Sender<BackendRequest>,
}

/// Creates a mock backend and the receiver its requests arrive on.
pub fn create_mock_backend(buffer_size: usize) -> (MockBackend, mpsc::Receiver<BackendRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockBackend { sender }, receiver)
}

#[async_trait]
impl StockService for MockBackend {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BackendRequest::Stock { product_id, respond_to })
            .await
            .map_err(|_| ServiceError::Network("mock backend closed".to_string()))?;
        response
            .await
            .map_err(|_| ServiceError::Network("mock request dropped".to_string()))?
    }
}

#[async_trait]
impl CatalogService for MockBackend {
    async fn product(&self, product_id: ProductId) -> Result<ProductDetails, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BackendRequest::Product { product_id, respond_to })
            .await
            .map_err(|_| ServiceError::Network("mock backend closed".to_string()))?;
        response
            .await
            .map_err(|_| ServiceError::Network("mock request dropped".to_string()))?
    }
}

/// Helper to verify that the next request is a stock lookup
pub async fn expect_stock(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(ProductId, BackendResponder<Stock>)> {
    match receiver.recv().await {
        Some(BackendRequest::Stock { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is a catalog lookup
pub async fn expect_product(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(ProductId, BackendResponder<ProductDetails>)> {
    match receiver.recv().await {
        Some(BackendRequest::Product { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

// =============================================================================
// Storage and wiring
// =============================================================================

/// Storage that reads like [`MemoryStorage`] but refuses every write.
#[derive(Clone, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
}

impl FailingStorage {
    pub fn new(inner: MemoryStorage) -> Self {
        Self { inner }
    }
}

impl CartStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("disk full".to_string()))
    }
}

/// Handles a test keeps after starting a cart actor.
pub struct TestCart {
    pub client: CartClient,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
    pub handle: tokio::task::JoinHandle<()>,
}

impl TestCart {
    /// Drains the notifications sent so far.
    pub fn drain_notifications(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            messages.push(notification.message);
        }
        messages
    }
}

/// Starts a cart actor on the given backend and storage.
pub fn start_cart<B>(backend: B, storage: Arc<dyn CartStorage>) -> TestCart
where
    B: StockService + CatalogService + Clone + 'static,
{
    let (notifier, notifications) = ChannelNotifier::new();
    let collaborators = CartCollaborators {
        stock: Arc::new(backend.clone()),
        catalog: Arc::new(backend),
        storage,
        notifier: Arc::new(notifier),
    };
    let (service, client) = CartService::new(10, collaborators);
    let handle = tokio::spawn(service.run());
    TestCart {
        client,
        notifications,
        handle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let (backend, mut receiver) = create_mock_backend(10);

        let lookup = tokio::spawn(async move { backend.stock(ProductId(3)).await });

        let (product_id, responder) = expect_stock(&mut receiver).await.expect("Expected stock lookup");
        assert_eq!(product_id, ProductId(3));
        responder.send(Ok(Stock::new(3, 7))).unwrap();

        let result = lookup.await.unwrap();
        assert_eq!(result, Ok(Stock::new(3, 7)));
    }
}
