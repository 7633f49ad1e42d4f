//! Change notifications for cart subscribers.
//!
//! Observers run synchronously, in subscription order, after each mutation
//! has been persisted. The presentation layer decides what to re-render.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use cafe_cart_core::LineItemId;

use crate::line_item::LineItem;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// What changed in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// An item was added. `merged` is true when it was folded into an
    /// existing line instead of appended.
    ItemAdded { id: LineItemId, merged: bool },
    /// A line's quantity went up or down without removing it.
    QuantityChanged { id: LineItemId },
    /// A line was removed.
    ItemRemoved { id: LineItemId },
    /// The cart was emptied.
    Cleared,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CartEvent, &[LineItem])>;

/// Ordered set of subscribed callbacks.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe(
        &mut self,
        callback: impl FnMut(&CartEvent, &[LineItem]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub(crate) fn notify(&mut self, event: &CartEvent, items: &[LineItem]) {
        for (_, callback) in &mut self.callbacks {
            callback(event, items);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribed", &self.callbacks.len())
            .finish()
    }
}

/// Keeps the navigation badge count (sum of quantities) up to date.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct BadgeCounter {
    count: Rc<Cell<u32>>,
}

impl BadgeCounter {
    /// Create a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current badge value.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.get()
    }

    /// Seed the counter from `store` and keep it in sync.
    pub fn attach<S: CartStorage>(&self, store: &mut CartStore<S>) -> SubscriptionId {
        self.count.set(store.total_item_count());
        let count = Rc::clone(&self.count);
        store.subscribe(move |_, items| {
            count.set(crate::totals::item_count(items));
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use cafe_cart_core::{Price, Quantity};

    use super::*;
    use crate::line_item::NewLineItem;
    use crate::storage::MemoryStorage;

    fn latte() -> NewLineItem {
        NewLineItem::new("Latte", Price::from_cents(350), "latte.jpg")
    }

    #[test]
    fn test_observers_run_in_subscription_order() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        store.subscribe(move |_, _| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        store.subscribe(move |_, _| second.borrow_mut().push("second"));

        store.add_item(latte()).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_, _| counter.set(counter.get() + 1));

        store.add_item(latte()).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_item(latte()).unwrap();

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_events_describe_the_change() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event, _| sink.borrow_mut().push(*event));

        let id = store.add_item(latte()).unwrap();
        store.add_item(latte()).unwrap();
        store.increase_quantity(id).unwrap();
        store.remove_item(id).unwrap();
        store.clear().unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                CartEvent::ItemAdded { id, merged: false },
                CartEvent::ItemAdded { id, merged: true },
                CartEvent::QuantityChanged { id },
                CartEvent::ItemRemoved { id },
                CartEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_badge_counter_tracks_quantities() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage, "cart");
        store
            .add_item(latte().with_quantity(Quantity::new(2).unwrap()))
            .unwrap();

        let badge = BadgeCounter::new();
        badge.attach(&mut store);
        assert_eq!(badge.count(), 2);

        store
            .add_item(latte().with_variant("Iced").with_quantity(Quantity::new(3).unwrap()))
            .unwrap();
        assert_eq!(badge.count(), 5);

        store.clear().unwrap();
        assert_eq!(badge.count(), 0);
    }
}
