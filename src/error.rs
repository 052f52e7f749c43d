use thiserror::Error;

use crate::domain::ProductId;

/// Faults at the stock/catalog HTTP boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Invalid response: {0}")]
    Invalid(String),
}

/// Faults of the persistent key-value store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Storage serialization error: {0}")]
    Serialize(String),
    #[error("Corrupt storage payload: {0}")]
    Corrupt(String),
}

/// A line-item list that breaks a cart invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidCart {
    #[error("Line item {0} has amount 0")]
    ZeroAmount(ProductId),
    #[error("Product {0} appears more than once")]
    DuplicateItem(ProductId),
}

/// Errors of cart mutations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    OutOfStock { requested: u64, available: u32 },
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    InvalidCart(#[from] InvalidCart),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// Business-rule rejections, as opposed to faults.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. } | CartError::NotInCart(_))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}
