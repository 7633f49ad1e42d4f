//! Derived cart figures.

use cafe_cart_core::Price;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::line_item::LineItem;

/// Fixed sales tax rate (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal, tax, total and item count for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of `unit_price × quantity` over all lines.
    pub subtotal: Price,
    /// `subtotal × TAX_RATE`, rounded to cents.
    pub tax: Price,
    /// `subtotal + tax`.
    pub total: Price,
    /// Sum of all quantities.
    pub item_count: u32,
}

impl CartTotals {
    /// Compute totals for `items`. Pure; an empty slice yields all zeros.
    ///
    /// Amounts saturate at `Decimal::MAX` instead of overflowing. The store
    /// never holds such a cart; see [`CartTotals::checked_from_items`].
    #[must_use]
    pub fn from_items(items: &[LineItem]) -> Self {
        let subtotal: Price = items.iter().map(LineItem::line_total).sum();
        let tax = subtotal.scaled_to_cents(TAX_RATE);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count: item_count(items),
        }
    }

    /// Compute totals, or `None` if any amount overflows `Decimal`.
    #[must_use]
    pub fn checked_from_items(items: &[LineItem]) -> Option<Self> {
        let subtotal = items.iter().try_fold(Price::ZERO, |sum, item| {
            item.checked_line_total()
                .and_then(|line_total| sum.checked_add(line_total))
        })?;
        let tax = subtotal.checked_scaled_to_cents(TAX_RATE)?;
        Some(Self {
            subtotal,
            tax,
            total: subtotal.checked_add(tax)?,
            item_count: item_count(items),
        })
    }
}

/// Sum of all quantities, saturating at `u32::MAX`.
#[must_use]
pub fn item_count(items: &[LineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |sum, item| sum.saturating_add(item.quantity.get()))
}
