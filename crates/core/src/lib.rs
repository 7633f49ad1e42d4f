//! Cafe Cart Core - Shared value types.
//!
//! This crate provides the value types used across all Cafe Cart components:
//! - `cart` - Cart state, persistence, totals and checkout
//! - `cli` - Terminal front end for the menu and cart pages
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for line item IDs, prices, quantities and
//!   payment methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
