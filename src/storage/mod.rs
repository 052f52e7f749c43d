//! Persistent key-value store the cart is mirrored to.
//!
//! The store holds text values under string keys, like browser local storage.
//! The cart lives under [`CART_STORAGE_KEY`] as a JSON array of line items and
//! is rewritten in full after every applied mutation.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use tracing::{debug, warn};

use crate::domain::Cart;
use crate::error::StorageError;

/// Key the serialized cart is stored under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Synchronous key-value text store.
pub trait CartStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads the persisted cart.
///
/// A missing key, an unreadable store, or a payload that is not a valid cart
/// all load as the empty cart; the latter two are logged.
pub fn load_cart(storage: &dyn CartStorage, key: &str) -> Cart {
    let payload = match storage.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            debug!(key, "No persisted cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read persisted cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Cart>(&payload) {
        Ok(cart) => {
            debug!(key, items = cart.len(), "Restored persisted cart");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "Persisted cart is corrupt, starting empty");
            Cart::new()
        }
    }
}

/// Overwrites the persisted cart.
pub fn save_cart(storage: &dyn CartStorage, key: &str, cart: &Cart) -> Result<(), StorageError> {
    let payload = serde_json::to_string(cart)?;
    storage.set(key, &payload)
}
