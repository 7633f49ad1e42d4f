//! Simulated checkout.
//!
//! No payment is taken. Checkout snapshots the cart into an
//! [`OrderConfirmation`], echoes the chosen payment method, and clears the
//! cart. An order only counts as placed once the cleared cart is saved.

use cafe_cart_core::{PaymentMethod, Price};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::error::CartError;
use crate::storage::CartStorage;
use crate::store::CartStore;
use crate::totals::CartTotals;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out. The cart is left untouched.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// Saving the cleared cart failed. The order was not placed and the
    /// cart still holds its lines.
    #[error("Order not placed: the cart could not be cleared: {0}")]
    Cart(#[from] CartError),
}

/// One line as it appeared on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub lines: Vec<OrderLine>,
    pub totals: CartTotals,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Grand total charged.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.totals.total
    }

    /// Number of units ordered.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.totals.item_count
    }

    /// Customer-facing confirmation text.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Thank you for your order!\n\nTotal: {}\nPayment Method: {}\n\nYour order has been placed successfully!",
            self.totals.total,
            self.payment_method.display_name()
        )
    }
}

/// Place an order for the current cart contents and clear the cart.
///
/// `payment_method` defaults to cash when none is selected.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no lines, or
/// `CheckoutError::Cart` if the cleared cart cannot be persisted.
#[instrument(skip(store))]
pub fn checkout<S: CartStorage>(
    store: &mut CartStore<S>,
    payment_method: Option<PaymentMethod>,
) -> Result<OrderConfirmation, CheckoutError> {
    if store.is_empty() {
        tracing::info!("Checkout rejected: cart is empty");
        return Err(CheckoutError::EmptyCart);
    }

    let confirmation = OrderConfirmation {
        lines: store
            .items()
            .iter()
            .map(|item| OrderLine {
                name: item.name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity.get(),
                line_total: item.line_total(),
            })
            .collect(),
        totals: store.totals(),
        payment_method: payment_method.unwrap_or_default(),
        placed_at: Utc::now(),
    };

    let snapshot = store.items().to_vec();
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "Checkout aborted, cart kept");
        store.reinstate(snapshot);
        return Err(e.into());
    }

    tracing::info!(
        total = %confirmation.totals.total,
        items = confirmation.totals.item_count,
        payment = confirmation.payment_method.key(),
        "Order placed"
    );
    Ok(confirmation)
}
