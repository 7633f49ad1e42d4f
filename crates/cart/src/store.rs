//! The cart store.
//!
//! [`CartStore`] owns the ordered list of line items. Lines are addressed by
//! a stable [`LineItemId`] rather than by position, so removing one line
//! never invalidates a handle to another. Position-based callers can map a
//! render row back to an id with [`CartStore::id_at`].

use cafe_cart_core::{LineItemId, Quantity};
use tracing::instrument;

use crate::error::{CartError, Result};
use crate::line_item::{LineItem, LineItemRecord, NewLineItem};
use crate::observer::{CartEvent, Observers, SubscriptionId};
use crate::storage::CartStorage;
use crate::totals::{self, CartTotals};

/// Default storage key, matching the browser implementation.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Sole authority over cart contents.
///
/// Every successful mutation overwrites the persisted cart in full and then
/// notifies observers. If persisting fails the in-memory change still
/// stands, the error is returned, and observers are not notified.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    items: Vec<LineItem>,
    storage: S,
    key: String,
    observers: Observers,
}

impl<S: CartStorage> CartStore<S> {
    /// Restore the cart stored under `key`.
    ///
    /// An absent key, an unreadable store, or a malformed value all yield an
    /// empty cart; this never fails.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = restore(&storage, &key);
        tracing::debug!(key = %key, lines = items.len(), "Cart restored");
        Self {
            items,
            storage,
            key,
            observers: Observers::default(),
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Id of the line at render position `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<LineItemId> {
        self.items.get(index).map(|item| item.id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Storage key the cart persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Subtotal, tax, total and item count.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.items)
    }

    /// Sum of all quantities; zero for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        totals::item_count(&self.items)
    }

    /// Register a callback run after every persisted mutation.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&CartEvent, &[LineItem]) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Add an item, merging into an existing line with the same display name.
    ///
    /// Distinct variants of one base item become distinct lines. Merged
    /// quantities saturate at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AmountOverflow`, leaving the cart unchanged, if
    /// the new totals cannot be represented. Returns `CartError` if the cart
    /// cannot be persisted.
    #[instrument(skip(self, item), fields(name = %item.display_name(), quantity = %item.quantity))]
    pub fn add_item(&mut self, item: NewLineItem) -> Result<LineItemId> {
        let name = item.display_name();

        let (id, merged) = if let Some(existing) = self.items.iter_mut().find(|l| l.name == name) {
            let previous = existing.quantity;
            existing.quantity = previous.saturating_add(item.quantity);
            let id = existing.id;
            if !fits(&self.items) {
                self.revert_quantity(id, previous);
                return Err(overflow(name));
            }
            (id, true)
        } else {
            let id = LineItemId::generate();
            self.items.push(LineItem {
                id,
                name,
                unit_price: item.unit_price,
                image: item.image,
                quantity: item.quantity,
            });
            if !fits(&self.items) {
                let name = self.items.pop().map(|line| line.name).unwrap_or_default();
                return Err(overflow(name));
            }
            (id, false)
        };

        tracing::debug!(%id, merged, "Item added to cart");
        self.commit(CartEvent::ItemAdded { id, merged })?;
        Ok(id)
    }

    /// Add one unit to a line. Unknown ids are a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AmountOverflow`, leaving the cart unchanged, if
    /// the new totals cannot be represented. Returns `CartError` if the cart
    /// cannot be persisted.
    #[instrument(skip(self))]
    pub fn increase_quantity(&mut self, id: LineItemId) -> Result<bool> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::debug!("Increase ignored for unknown line");
            return Ok(false);
        };
        let previous = item.quantity;
        item.quantity = previous.increment();
        if !fits(&self.items) {
            let name = self.revert_quantity(id, previous);
            return Err(overflow(name));
        }
        self.commit(CartEvent::QuantityChanged { id })?;
        Ok(true)
    }

    /// Remove one unit from a line, dropping the line instead of reaching
    /// zero. Unknown ids are a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn decrease_quantity(&mut self, id: LineItemId) -> Result<bool> {
        let Some(position) = self.position(id) else {
            tracing::debug!("Decrease ignored for unknown line");
            return Ok(false);
        };

        let decremented = self
            .items
            .get(position)
            .and_then(|item| item.quantity.decrement());

        let event = if let Some(quantity) = decremented {
            if let Some(item) = self.items.get_mut(position) {
                item.quantity = quantity;
            }
            CartEvent::QuantityChanged { id }
        } else {
            self.items.remove(position);
            CartEvent::ItemRemoved { id }
        };

        self.commit(event)?;
        Ok(true)
    }

    /// Remove a line regardless of quantity. Unknown ids are a no-op
    /// returning `false`.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: LineItemId) -> Result<bool> {
        let Some(position) = self.position(id) else {
            tracing::debug!("Remove ignored for unknown line");
            return Ok(false);
        };
        self.items.remove(position);
        self.commit(CartEvent::ItemRemoved { id })?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.commit(CartEvent::Cleared)
    }

    fn position(&self, id: LineItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Undo an in-memory quantity change, returning the line's name.
    fn revert_quantity(&mut self, id: LineItemId, quantity: Quantity) -> String {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .map(|item| {
                item.quantity = quantity;
                item.name.clone()
            })
            .unwrap_or_default()
    }

    /// Put back lines taken out by a mutation whose save failed. Neither
    /// persists nor notifies; storage still holds these lines.
    pub(crate) fn reinstate(&mut self, items: Vec<LineItem>) {
        self.items = items;
    }

    /// Persist the whole cart, then notify observers.
    fn commit(&mut self, event: CartEvent) -> Result<()> {
        let records: Vec<LineItemRecord> = self.items.iter().map(LineItem::to_record).collect();
        let value = serde_json::to_string(&records)?;

        if let Err(e) = self.storage.set_item(&self.key, &value) {
            tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
            return Err(e.into());
        }

        self.observers.notify(&event, &self.items);
        Ok(())
    }
}

/// Read and decode the persisted cart, falling back to empty.
fn restore<S: CartStorage>(storage: &S, key: &str) -> Vec<LineItem> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Cart storage unreadable, starting empty");
            return Vec::new();
        }
    };

    let records: Vec<LineItemRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(key, error = %e, "Persisted cart malformed, starting empty");
            return Vec::new();
        }
    };

    // Collapse duplicate names so display names stay unique.
    let mut items: Vec<LineItem> = Vec::with_capacity(records.len());
    for record in records {
        if let Some(existing) = items.iter_mut().find(|item| item.name == record.name) {
            existing.quantity = existing.quantity.saturating_add(record.quantity);
        } else {
            items.push(LineItem::from_record(record));
        }
    }

    if !fits(&items) {
        tracing::warn!(key, "Persisted cart total out of range, starting empty");
        return Vec::new();
    }
    items
}

/// Whether every amount derived from `items` is representable.
fn fits(items: &[LineItem]) -> bool {
    CartTotals::checked_from_items(items).is_some()
}

fn overflow(name: String) -> CartError {
    tracing::warn!(name = %name, "Cart total would overflow, change rejected");
    CartError::AmountOverflow(name)
}
