//! Integration tests for cart merge, split and removal rules.
//!
//! These tests drive the store through its public API against in-memory
//! storage and check both the live state and what was persisted.

#![allow(clippy::unwrap_used)]

use cafe_cart::{CartTotals, CartView};
use cafe_cart_core::Price;
use cafe_cart_integration_tests::{item, memory_store};

// =============================================================================
// Merge Rules
// =============================================================================

#[test]
fn test_same_item_and_variant_accumulates() {
    let (mut store, _) = memory_store();
    store.add_item(item("Latte", 350, Some("Hot"), 2)).unwrap();
    store.add_item(item("Latte", 350, Some("Hot"), 5)).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.items().first().unwrap().quantity.get(), 7);
}

#[test]
fn test_two_variants_make_two_lines() {
    let (mut store, _) = memory_store();
    store.add_item(item("Latte", 350, Some("Hot"), 1)).unwrap();
    store.add_item(item("Latte", 350, Some("Iced"), 2)).unwrap();

    let rows: Vec<(&str, u32)> = store
        .items()
        .iter()
        .map(|line| (line.name.as_str(), line.quantity.get()))
        .collect();
    assert_eq!(rows, [("Latte (Hot)", 1), ("Latte (Iced)", 2)]);
}

#[test]
fn test_variant_and_plain_are_distinct() {
    let (mut store, _) = memory_store();
    store.add_item(item("Latte", 350, None, 1)).unwrap();
    store.add_item(item("Latte", 350, Some("Iced"), 1)).unwrap();
    assert_eq!(store.len(), 2);
}

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_latte_scenario() {
    let (mut store, _) = memory_store();
    store.add_item(item("Latte", 350, Some("Hot"), 1)).unwrap();
    store.add_item(item("Latte", 350, Some("Iced"), 2)).unwrap();

    let totals = store.totals();
    assert_eq!(totals.subtotal, Price::from_cents(1050));
    assert_eq!(totals.tax, Price::from_cents(84));
    assert_eq!(totals.total, Price::from_cents(1134));
    assert_eq!(totals.item_count, 3);
}

#[test]
fn test_totals_match_line_sums() {
    let (mut store, _) = memory_store();
    store.add_item(item("Tapsilog", 650, None, 2)).unwrap();
    store.add_item(item("Ensaymada", 250, None, 3)).unwrap();
    store.add_item(item("Americano", 300, Some("Iced"), 1)).unwrap();

    let expected_subtotal: Price = store.items().iter().map(|l| l.line_total()).sum();
    let totals = store.totals();
    assert_eq!(totals.subtotal, expected_subtotal);
    assert_eq!(totals.subtotal, Price::from_cents(2350));
    assert_eq!(totals.tax, Price::from_cents(188));
    assert_eq!(totals.total, totals.subtotal + totals.tax);
    assert_eq!(store.total_item_count(), 6);
}

#[test]
fn test_empty_cart_counts_zero() {
    let (store, _) = memory_store();
    assert_eq!(store.total_item_count(), 0);
    assert_eq!(store.totals(), CartTotals::from_items(&[]));
    assert_eq!(CartView::from(&store), CartView::empty());
}

// =============================================================================
// Decrease / Remove
// =============================================================================

#[test]
fn test_decrease_to_removal_scenario() {
    let (mut store, storage) = memory_store();
    let id = store.add_item(item("Clubhouse", 500, None, 3)).unwrap();

    store.decrease_quantity(id).unwrap();
    store.decrease_quantity(id).unwrap();
    assert_eq!(store.get(id).unwrap().quantity.get(), 1);

    store.decrease_quantity(id).unwrap();
    assert!(store.is_empty());
    assert_eq!(storage.peek("cart").as_deref(), Some("[]"));
}

#[test]
fn test_remove_ignores_quantity() {
    let (mut store, _) = memory_store();
    let id = store.add_item(item("Tapsilog", 650, None, 9)).unwrap();
    assert!(store.remove_item(id).unwrap());
    assert!(store.is_empty());
}

#[test]
fn test_positions_shift_but_ids_do_not() {
    let (mut store, _) = memory_store();
    let first = store.add_item(item("Latte", 350, Some("Hot"), 1)).unwrap();
    let second = store.add_item(item("Latte", 350, Some("Iced"), 1)).unwrap();
    let third = store.add_item(item("Croissant", 275, None, 1)).unwrap();

    store.decrease_quantity(first).unwrap();

    assert_eq!(store.id_at(0), Some(second));
    assert_eq!(store.id_at(1), Some(third));
    store.increase_quantity(third).unwrap();
    assert_eq!(store.get(third).unwrap().quantity.get(), 2);
}

// =============================================================================
// Persisted Layout
// =============================================================================

#[test]
fn test_persisted_layout() {
    let (mut store, storage) = memory_store();
    store.add_item(item("Latte", 350, Some("Iced"), 2)).unwrap();

    let raw = storage.peek("cart").unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "name": "Latte (Iced)",
            "price": 3.5,
            "image": "images/Latte.jpg",
            "quantity": 2
        }])
    );
}
