//! Render models for the cart page.
//!
//! Everything here is pre-formatted for display; money is rendered with two
//! decimal places.

use cafe_cart_core::LineItemId;
use serde::Serialize;

use crate::line_item::LineItem;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: LineItemId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            tax: "$0.00".to_string(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Whether there is anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity.get(),
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

impl<S: CartStorage> From<&CartStore<S>> for CartView {
    fn from(store: &CartStore<S>) -> Self {
        let totals = store.totals();
        Self {
            items: store.items().iter().map(CartItemView::from).collect(),
            subtotal: totals.subtotal.to_string(),
            tax: totals.tax.to_string(),
            total: totals.total.to_string(),
            item_count: totals.item_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use cafe_cart_core::{Price, Quantity};

    use super::*;
    use crate::line_item::NewLineItem;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_empty_store_matches_empty_view() {
        let store = CartStore::open(MemoryStorage::new(), "cart");
        assert_eq!(CartView::from(&store), CartView::empty());
    }

    #[test]
    fn test_rows_are_formatted() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        store
            .add_item(
                NewLineItem::new("Tapsilog", Price::from_cents(650), "images/tapsilog.jpg")
                    .with_quantity(Quantity::new(2).unwrap()),
            )
            .unwrap();

        let view = CartView::from(&store);
        assert_eq!(view.items[0].unit_price, "$6.50");
        assert_eq!(view.items[0].line_total, "$13.00");
        assert_eq!(view.subtotal, "$13.00");
        assert_eq!(view.tax, "$1.04");
        assert_eq!(view.total, "$14.04");
        assert_eq!(view.item_count, 2);
    }
}
