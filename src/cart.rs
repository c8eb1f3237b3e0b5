//! Cart

use std::fmt;

use rust_decimal::Decimal;
use slotmap::{SlotMap, new_key_type};

use crate::{
    items::Item,
    pricing::{CartTotals, cart_totals},
    storage::CartSlot,
};

new_key_type! {
    /// Subscriber Key
    pub struct SubscriberKey;
}

/// A listener invoked after every state-changing mutation.
type Listener = Box<dyn FnMut(&[CartLine], CartTotals)>;

/// One (item snapshot, quantity) pair in the cart.
///
/// A line with quantity zero never exists as stored state; mutations that
/// would produce one remove the line instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item: Item,
    quantity: u32,
}

impl CartLine {
    /// Creates a line pairing an item snapshot with a quantity.
    #[must_use]
    pub fn new(item: Item, quantity: u32) -> Self {
        Self { item, quantity }
    }

    /// Returns the item snapshot for this line.
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the quantity of this line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns unit price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price() * Decimal::from(self.quantity)
    }
}

/// In-memory cart aggregate: insertion-ordered lines, derived totals,
/// synchronous change notifications, and optional write-through persistence.
///
/// At most one line exists per item id; adding an already-present item
/// increments its quantity and keeps the originally stored snapshot. Line
/// order is insertion order and quantity changes never reorder.
pub struct CartStore {
    lines: Vec<CartLine>,
    subscribers: SlotMap<SubscriberKey, Listener>,
    slot: Option<CartSlot>,
}

impl CartStore {
    /// Creates an empty, in-memory-only cart.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            subscribers: SlotMap::with_key(),
            slot: None,
        }
    }

    /// Creates a cart backed by the given persistence slot, hydrating from it.
    ///
    /// Hydration failure of any kind (missing file, malformed payload, IO
    /// error) degrades to an empty cart with a logged warning; this
    /// constructor never fails.
    #[must_use]
    pub fn with_storage(slot: CartSlot) -> Self {
        let lines = match slot.load() {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(
                    path = %slot.path().display(),
                    %error,
                    "cart hydration failed; starting empty"
                );
                Vec::new()
            }
        };

        Self {
            lines,
            subscribers: SlotMap::with_key(),
            slot: Some(slot),
        }
    }

    /// Adds an item to the cart.
    ///
    /// A non-positive `quantity` is clamped to 1; this is the single place
    /// the permissive quantity policy lives. If a line already exists for the
    /// item's id, its quantity is incremented and the stored snapshot is kept
    /// unchanged; otherwise a new line is appended at the end.
    pub fn add_item(&mut self, item: Item, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id() == item.id()) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::new(item, quantity));
        }

        self.commit();
    }

    /// Adds a single unit of an item, the "Add to cart" button semantics.
    pub fn add_one(&mut self, item: Item) {
        self.add_item(item, 1);
    }

    /// Removes the line for `item_id` if present; silently does nothing if
    /// there is no such line.
    pub fn remove_item(&mut self, item_id: &str) {
        let Some(idx) = self.lines.iter().position(|line| line.item.id() == item_id) else {
            return;
        };

        self.lines.remove(idx);
        self.commit();
    }

    /// Sets the quantity of the line for `item_id`.
    ///
    /// A quantity of zero behaves as [`Self::remove_item`]. Setting a quantity
    /// on an absent id does nothing; a removed line is never resurrected
    /// without item data; callers must use [`Self::add_item`] instead.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.item.id() == item_id) else {
            return;
        };

        if line.quantity == quantity {
            return;
        }

        line.quantity = quantity;
        self.commit();
    }

    /// Removes all lines. Clearing an already-empty cart is a silent no-op.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        self.lines.clear();
        self.commit();
    }

    /// Returns the current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the totals derived from the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        cart_totals(&self.lines)
    }

    /// Returns the quantity of the line for `item_id`, if present.
    #[must_use]
    pub fn quantity_of(&self, item_id: &str) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.item.id() == item_id)
            .map(CartLine::quantity)
    }

    /// Returns the number of lines (not the total item count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Registers a listener invoked after every state-changing mutation with
    /// the new lines and totals. Listeners are called synchronously, in
    /// mutation order, before the mutation returns.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&[CartLine], CartTotals) + 'static,
    ) -> SubscriberKey {
        self.subscribers.insert(Box::new(listener))
    }

    /// Removes a previously registered listener. Returns `false` if the key
    /// was already unsubscribed.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        self.subscribers.remove(key).is_some()
    }

    /// Write-through then notification, in that order, for a mutation that
    /// changed state. Persistence is best-effort: a failed save is logged and
    /// the in-memory state remains authoritative.
    fn commit(&mut self) {
        if let Some(slot) = &self.slot {
            if let Err(error) = slot.save(&self.lines) {
                tracing::warn!(
                    path = %slot.path().display(),
                    %error,
                    "cart write-through failed; in-memory state kept"
                );
            }
        }

        let totals = cart_totals(&self.lines);
        let lines = &self.lines;

        for listener in self.subscribers.values_mut() {
            listener(lines, totals);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("subscribers", &self.subscribers.len())
            .field("slot", &self.slot)
            .finish()
    }
}
