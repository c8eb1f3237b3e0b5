//! Item snapshots

use rust_decimal::Decimal;

/// An immutable snapshot of a catalog item, captured when it enters the cart.
///
/// The snapshot is deliberately never refreshed: a later catalog price change
/// does not touch lines already in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    name: String,
    price: Decimal,
    toppings: Vec<String>,
}

impl Item {
    /// Creates a new item snapshot with the given display fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        toppings: impl Into<Vec<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            toppings: toppings.into(),
        }
    }

    /// Returns the catalog identifier of the item.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price captured at insertion time.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the toppings shown on receipts for this item.
    #[must_use]
    pub fn toppings(&self) -> &[String] {
        &self.toppings
    }
}
