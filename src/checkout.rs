//! Checkout
//!
//! Builds an order payload from the cart and completes the flow: validate
//! the delivery details, submit, and only clear the cart once the order has
//! been accepted. A rejected submission leaves the cart untouched so nothing
//! is lost.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{CartLine, CartStore},
    receipt::{OrderSummary, SummaryError},
};

/// Field names of [`DeliveryDetails`], for missing-field reporting.
type FieldNames = SmallVec<[&'static str; 7]>;

/// Rejection reason reported by an order submission endpoint.
#[derive(Debug, Error)]
#[error("order submission rejected: {0}")]
pub struct SubmitError(pub String);

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines; there is nothing to order.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// Required delivery fields were left blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(FieldNames),

    /// The email address does not look like an email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The submission endpoint rejected the order.
    #[error(transparent)]
    Rejected(#[from] SubmitError),

    /// The order summary could not be built.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Delivery details collected from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    /// First name of the recipient.
    pub first_name: String,

    /// Last name of the recipient.
    pub last_name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// ZIP / postal code.
    pub zip: String,
}

impl DeliveryDetails {
    /// Returns the names of required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> FieldNames {
        let fields = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("zip", &self.zip),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Validates the details: every field is required, and the email must
    /// have the shape `local@host.tld`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] naming every blank field, or
    /// [`CheckoutError::InvalidEmail`] when the email shape is wrong.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let missing = self.missing_fields();

        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        if !email_is_valid(&self.email) {
            return Err(CheckoutError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

/// Checks the storefront's email shape: a non-space local part, `@`, and a
/// domain containing a dot with non-space runs on both sides.
fn email_is_valid(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay by card on submission.
    Card,

    /// Pay cash on delivery.
    Cash,
}

/// Lifecycle state of an order after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted but not yet picked up by the kitchen.
    Pending,

    /// Being prepared.
    Processing,

    /// Out for delivery.
    Shipped,

    /// Delivered.
    Delivered,
}

/// One ordered line: the cart line reduced to its order-payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog id of the ordered item.
    pub item_id: String,

    /// Display name at the time of ordering.
    pub name: String,

    /// Unit price captured in the cart snapshot.
    pub unit_price: Decimal,

    /// Ordered quantity.
    pub quantity: u32,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        let item = line.item();

        Self {
            item_id: item.id().to_string(),
            name: item.name().to_string(),
            unit_price: item.price(),
            quantity: line.quantity(),
        }
    }
}

/// An immutable order payload, built from the cart at submission time.
///
/// Carries no id or created-at timestamp; those belong to the server side
/// this storefront does not have.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    lines: Vec<OrderLine>,
    subtotal: Decimal,
    delivery_fee: Decimal,
    tax: Decimal,
    total: Decimal,
    details: DeliveryDetails,
    payment: PaymentMethod,
    status: OrderStatus,
}

impl Order {
    /// The ordered lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
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

    /// Grand total charged for the order.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Delivery details the order ships to.
    #[must_use]
    pub fn details(&self) -> &DeliveryDetails {
        &self.details
    }

    /// Payment method chosen at checkout.
    #[must_use]
    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

/// Places an order from the cart's current lines.
///
/// Validates the details, builds the order payload, and runs `submit`. The
/// cart is cleared exactly once, only after `submit` reports the order
/// accepted; on any failure the cart is left unchanged.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] when the cart has no lines.
/// - [`CheckoutError::MissingFields`] / [`CheckoutError::InvalidEmail`] when
///   the details fail validation.
/// - [`CheckoutError::Rejected`] when `submit` returns an error.
pub fn place_order(
    cart: &mut CartStore,
    details: DeliveryDetails,
    payment: PaymentMethod,
    currency: &'static Currency,
    submit: impl FnOnce(&Order) -> Result<(), SubmitError>,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    details.validate()?;

    let summary = OrderSummary::from_lines(cart.lines(), currency)?;

    let order = Order {
        lines: cart.lines().iter().map(OrderLine::from).collect(),
        subtotal: summary.subtotal(),
        delivery_fee: summary.delivery_fee(),
        tax: summary.tax(),
        total: summary.total(),
        details,
        payment,
        status: OrderStatus::Pending,
    };

    submit(&order)?;

    cart.clear();

    Ok(order)
}
