//! Derived cart totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;

/// Totals derived from the current set of cart lines.
///
/// Never stored on the cart; always recomputed, so it cannot drift from the
/// lines it describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of all line quantities.
    pub total_items: u64,

    /// Sum of unit price × quantity over all lines.
    pub total_price: Decimal,
}

/// Recomputes the totals for a slice of cart lines.
#[must_use]
pub fn cart_totals(lines: &[CartLine]) -> CartTotals {
    lines
        .iter()
        .fold(CartTotals::default(), |acc, line| CartTotals {
            total_items: acc.total_items + u64::from(line.quantity()),
            total_price: acc.total_price + line.line_total(),
        })
}
