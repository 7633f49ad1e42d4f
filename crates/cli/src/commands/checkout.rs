//! Checkout.

use cafe_cart::{CartStorage, CartStore, CheckoutError, checkout};
use cafe_cart_core::PaymentMethod;

use super::CommandError;
use crate::render;

/// Place the order for the current cart.
///
/// An empty cart prints a rejection and leaves the cart untouched.
///
/// # Errors
///
/// Returns `CommandError::Checkout` if the cart cannot be cleared after the
/// order is placed.
pub fn place<S: CartStorage>(
    store: &mut CartStore<S>,
    payment: Option<PaymentMethod>,
) -> Result<(), CommandError> {
    match checkout(store, payment) {
        Ok(confirmation) => {
            render::confirmation(&confirmation);
            Ok(())
        }
        Err(CheckoutError::EmptyCart) => {
            render::notice(&CheckoutError::EmptyCart.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
