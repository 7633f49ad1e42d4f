//! Subcommand implementations.

pub mod cart;
pub mod checkout;
pub mod menu;

use thiserror::Error;

/// Errors raised by subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] cafe_cart::CartError),

    /// Checkout failed after the order was placed.
    #[error(transparent)]
    Checkout(#[from] cafe_cart::CheckoutError),

    /// JSON rendering failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Quantity argument was zero.
    #[error(transparent)]
    Quantity(#[from] cafe_cart_core::QuantityError),
}
