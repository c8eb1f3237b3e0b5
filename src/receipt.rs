//! Order summary
//!
//! Display-level derivations the storefront layers on the raw cart subtotal:
//! a flat delivery fee and sales tax. These are checkout math, not cart
//! state; the cart itself only ever reports `total_items` / `total_price`.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartLine, CartStore},
    pricing::cart_totals,
};

/// Flat delivery fee charged per order, in major units.
fn delivery_fee_amount() -> Decimal {
    Decimal::new(299, 2)
}

/// Sales tax rate applied to the subtotal.
fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(8, 2))
}

/// Errors that can occur when building or rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The cart has no lines; there is nothing to summarize.
    #[error("cannot summarize an empty cart")]
    EmptyCart,

    /// IO error writing the rendered summary.
    #[error("Failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// The checkout money block for one order: subtotal, delivery fee, tax, and
/// grand total, all in the menu currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    subtotal: Decimal,
    delivery_fee: Decimal,
    tax: Decimal,
    total: Decimal,
    total_items: u64,
    currency: &'static Currency,
}

impl OrderSummary {
    /// Builds a summary from the given cart lines.
    ///
    /// Tax is 8% of the subtotal, rounded half-away-from-zero to two decimal
    /// places; the total is subtotal + delivery fee + tax.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::EmptyCart`] when `lines` is empty; the
    /// storefront never reaches checkout with an empty cart, and a delivery
    /// fee on nothing is meaningless.
    pub fn from_lines(
        lines: &[CartLine],
        currency: &'static Currency,
    ) -> Result<Self, SummaryError> {
        if lines.is_empty() {
            return Err(SummaryError::EmptyCart);
        }

        let totals = cart_totals(lines);
        let subtotal = totals.total_price;
        let delivery_fee = delivery_fee_amount();
        let tax = (tax_rate() * subtotal)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let total = subtotal + delivery_fee + tax;

        Ok(Self {
            subtotal,
            delivery_fee,
            tax,
            total,
            total_items: totals.total_items,
            currency,
        })
    }

    /// Builds a summary from a cart store's current lines.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::EmptyCart`] when the cart is empty.
    pub fn from_store(cart: &CartStore, currency: &'static Currency) -> Result<Self, SummaryError> {
        Self::from_lines(cart.lines(), currency)
    }

    /// Sum of unit price × quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// The flat delivery fee.
    #[must_use]
    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    /// Sales tax on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Grand total: subtotal + delivery fee + tax.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Currency all summary values are denominated in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Renders the line items and summary block to the given writer.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if writing fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        lines: &[CartLine],
    ) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Toppings", "Unit Price", "Line Total"]);

        for line in lines {
            let item = line.item();

            builder.push_record([
                format!("{:<3}", line.quantity()),
                item.name().to_string(),
                item.toppings().join("\n"),
                self.money(item.price()),
                self.money(line.line_total()),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_summary_block(&mut out)?;

        Ok(())
    }

    fn write_summary_block(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let rows = [
            (" Subtotal:", self.money(self.subtotal), false),
            (" Delivery:", self.money(self.delivery_fee), false),
            (" Tax (8%):", self.money(self.tax), false),
            (" Total:", self.money(self.total), true),
        ];

        let label_width = rows
            .iter()
            .map(|(label, _, _)| label.len())
            .max()
            .unwrap_or(0);
        let value_width = rows
            .iter()
            .map(|(_, value, _)| value.len())
            .max()
            .unwrap_or(0);

        for (label, value, bold) in rows {
            if bold {
                writeln!(
                    out,
                    "\x1b[1m{label:<label_width$}\x1b[0m {value:>value_width$}"
                )?;
            } else {
                writeln!(out, "{label:<label_width$} {value:>value_width$}")?;
            }
        }

        Ok(())
    }

    fn money(&self, amount: Decimal) -> String {
        Money::from_decimal(amount, self.currency).to_string()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::items::Item;

    use super::*;

    fn scenario_lines() -> Vec<CartLine> {
        vec![
            CartLine::new(
                Item::new(
                    "1",
                    "Margherita Classic",
                    Decimal::new(1299, 2),
                    vec!["tomato sauce".to_string(), "mozzarella".to_string()],
                ),
                1,
            ),
            CartLine::new(
                Item::new("2", "Pepperoni Paradise", Decimal::new(1499, 2), Vec::new()),
                2,
            ),
        ]
    }

    #[test]
    fn summary_math_matches_the_storefront() -> TestResult {
        let summary = OrderSummary::from_lines(&scenario_lines(), iso::USD)?;

        assert_eq!(summary.subtotal(), Decimal::new(4297, 2));
        assert_eq!(summary.delivery_fee(), Decimal::new(299, 2));
        // 42.97 × 0.08 = 3.4376, rounded half-away-from-zero to 3.44.
        assert_eq!(summary.tax(), Decimal::new(344, 2));
        assert_eq!(summary.total(), Decimal::new(4940, 2));
        assert_eq!(summary.total_items(), 3);

        Ok(())
    }

    #[test]
    fn empty_cart_cannot_be_summarized() {
        let result = OrderSummary::from_lines(&[], iso::USD);

        assert!(matches!(result, Err(SummaryError::EmptyCart)));
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let lines = scenario_lines();
        let summary = OrderSummary::from_lines(&lines, iso::USD)?;

        let mut rendered = Vec::new();
        summary.write_to(&mut rendered, &lines)?;
        let rendered = String::from_utf8(rendered)?;

        assert!(rendered.contains("Margherita Classic"));
        assert!(rendered.contains("$29.98"));
        assert!(rendered.contains("Subtotal:"));
        assert!(rendered.contains("$49.40"));

        Ok(())
    }
}
