//! Integration tests for Cafe Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cafe-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Merge, split and removal rules against an in-memory store
//! - `checkout_flow` - Menu page to confirmation
//! - `file_persistence` - Restoring carts across "page loads" from disk

#![cfg_attr(not(test), forbid(unsafe_code))]

use cafe_cart::{CartStore, MemoryStorage, NewLineItem};
use cafe_cart_core::{Price, Quantity};

/// Open an empty store over shared in-memory storage.
///
/// The returned storage handle observes everything the store persists.
#[must_use]
pub fn memory_store() -> (CartStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (CartStore::open(storage.clone(), "cart"), storage)
}

/// A `NewLineItem` for `name` at `cents`, `quantity` units, optional variant.
///
/// # Panics
///
/// Panics if `quantity` is zero.
#[must_use]
#[allow(clippy::expect_used)]
pub fn item(name: &str, cents: i64, variant: Option<&str>, quantity: u32) -> NewLineItem {
    let request = NewLineItem::new(name, Price::from_cents(cents), format!("images/{name}.jpg"))
        .with_quantity(Quantity::new(quantity).expect("test quantity must be positive"));
    match variant {
        Some(variant) => request.with_variant(variant),
        None => request,
    }
}
