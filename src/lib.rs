//! Crust
//!
//! Crust is the cart core of a pizza storefront: immutable item snapshots, an
//! insertion-ordered cart aggregate with derived totals and synchronous change
//! notifications, a best-effort persistence slot, and the checkout plumbing
//! layered on top.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod items;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod storage;
pub mod utils;
