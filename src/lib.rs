//! # Cart Store
//!
//! Shopping-cart state for a storefront: an ordered list of line items kept by
//! a single-writer actor, mirrored to a persistent key-value store, and
//! checked against live stock before every addition or amount change.
//!
//! - **Domain types** - [`Cart`], [`Product`], [`ProductDetails`], [`Stock`]
//! - **Cart actor** - [`CartService`] owns the cart and serializes mutations
//! - **Client handle** - [`CartClient`] reads, subscribes, and sends mutations
//! - **Collaborators** - [`StockService`], [`CatalogService`], [`CartStorage`], [`Notifier`]
//! - **System** - [`CartSystem`] starts and stops the actor for a session
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let system = CartSystem::from_config(&CartConfig::from_env()?, Arc::new(TracingNotifier))?;
//!
//! let outcome = system.cart_client.add_product(ProductId(1)).await?;
//! let cart = system.cart_client.cart();
//!
//! system.shutdown().await?;
//! ```
//!
//! Failures never surface as errors of the call: the user is told through the
//! [`Notifier`] and the caller receives a [`MutationOutcome`]. The only `Err`
//! is a closed actor.

pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod notify;
pub mod services;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use actors::{CartCollaborators, CartService};
pub use app_system::{setup_tracing, CartSystem};
pub use clients::CartClient;
pub use config::CartConfig;
pub use domain::{Cart, Product, ProductDetails, ProductId, Stock};
pub use error::{CartError, ServiceError, StorageError};
pub use messages::{MutationOutcome, UpdateProductAmount};
pub use notify::{ChannelNotifier, Notifier, TracingNotifier};
pub use services::{CatalogService, HttpApi, StockService};
pub use storage::{CartStorage, FileStorage, MemoryStorage, CART_STORAGE_KEY};
