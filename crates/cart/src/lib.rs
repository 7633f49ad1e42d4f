//! Cafe Cart - Cart state management for a small restaurant ordering site.
//!
//! The [`CartStore`] is the single authority over cart contents. It merges
//! repeated additions of the same item, removes lines whose quantity would
//! reach zero, derives totals, persists every mutation through a
//! [`CartStorage`] port, and notifies subscribed observers.
//!
//! # Modules
//!
//! - [`store`] - The cart store and its mutators
//! - [`line_item`] - Line items and their persisted layout
//! - [`totals`] - Subtotal, tax and total derivation
//! - [`storage`] - Key/value persistence port with memory and file adapters
//! - [`observer`] - Change notifications
//! - [`checkout`] - Simulated checkout and order confirmation
//! - [`menu`] - Bundled menu, category filtering and the menu page model
//! - [`view`] - Formatted render models for the cart page
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod line_item;
pub mod menu;
pub mod observer;
pub mod storage;
pub mod store;
pub mod totals;
pub mod view;

pub use checkout::{CheckoutError, OrderConfirmation, OrderLine, checkout};
pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use line_item::{LineItem, NewLineItem};
pub use menu::{Category, CategoryFilter, Menu, MenuItem, MenuPage, QuantitySelector};
pub use observer::{BadgeCounter, CartEvent, SubscriptionId};
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
pub use totals::{CartTotals, TAX_RATE};
pub use view::{CartItemView, CartView};
