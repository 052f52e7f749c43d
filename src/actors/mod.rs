//! Actors owning mutable state. The cart actor is the only writer of the cart.

mod cart_service;

pub use cart_service::*;
