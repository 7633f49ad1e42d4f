//! Cart page actions.
//!
//! Row positions are 1-based and refer to the last `cafe cart` listing.
//! A position with no row is ignored.

use cafe_cart::{CartStorage, CartStore, CartView, Menu, MenuPage};
use cafe_cart_core::{LineItemId, Quantity};

use super::CommandError;
use crate::render;

/// Add `quantity` of the menu item `slug`, with an optional variant.
///
/// # Errors
///
/// Returns `CommandError` for unknown items or variants, or if the cart
/// cannot be saved.
pub fn add<S: CartStorage>(
    store: &mut CartStore<S>,
    slug: &str,
    variant: Option<&str>,
    quantity: u32,
) -> Result<(), CommandError> {
    let mut page = MenuPage::new(Menu::bundled());
    page.set_quantity(slug, Quantity::new(quantity)?)?;
    if let Some(variant) = variant {
        page.select_variant(slug, variant)?;
    }

    let id = page.add_to_cart(slug, store)?;
    if let Some(line) = store.get(id) {
        render::added(line);
    }
    Ok(())
}

/// Print the cart page.
///
/// # Errors
///
/// Returns `CommandError::Json` if JSON output cannot be produced.
pub fn show<S: CartStorage>(store: &CartStore<S>, json: bool) -> Result<(), CommandError> {
    let view = CartView::from(store);
    if json {
        render::json(&view)?;
    } else {
        render::cart(&view);
    }
    Ok(())
}

/// Add one unit to the row at `position`.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub fn increase<S: CartStorage>(
    store: &mut CartStore<S>,
    position: usize,
) -> Result<(), CommandError> {
    if let Some(id) = resolve(store, position) {
        store.increase_quantity(id)?;
    }
    show(store, false)
}

/// Remove one unit from the row at `position`, dropping the row at zero.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub fn decrease<S: CartStorage>(
    store: &mut CartStore<S>,
    position: usize,
) -> Result<(), CommandError> {
    if let Some(id) = resolve(store, position) {
        store.decrease_quantity(id)?;
    }
    show(store, false)
}

/// Remove the row at `position`.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub fn remove<S: CartStorage>(
    store: &mut CartStore<S>,
    position: usize,
) -> Result<(), CommandError> {
    if let Some(id) = resolve(store, position) {
        store.remove_item(id)?;
    }
    show(store, false)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub fn clear<S: CartStorage>(store: &mut CartStore<S>) -> Result<(), CommandError> {
    store.clear()?;
    show(store, false)
}

fn resolve<S: CartStorage>(store: &CartStore<S>, position: usize) -> Option<LineItemId> {
    let id = position.checked_sub(1).and_then(|index| store.id_at(index));
    if id.is_none() {
        tracing::warn!(position, rows = store.len(), "No cart row at position");
    }
    id
}
