//! Crust prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLine, CartStore, SubscriberKey},
    checkout::{
        CheckoutError, DeliveryDetails, Order, OrderLine, OrderStatus, PaymentMethod, SubmitError,
        place_order,
    },
    fixtures::{FixtureError, load_menu, load_menu_from, parse_menu},
    items::Item,
    menu::{Category, Menu, MenuItem},
    pricing::{CartTotals, cart_totals},
    receipt::{OrderSummary, SummaryError},
    storage::{CartSlot, StorageError},
};
