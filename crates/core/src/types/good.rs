//! Catalog line item value type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single catalog line item: a title and its price.
///
/// `Good` is an immutable value. Two goods are equal when both their title
/// and their price match; the cart relies on this when removing an entry.
/// A good has no identity of its own - it is owned by whichever [`Cart`] or
/// [`Order`] holds it.
///
/// [`Cart`]: crate::Cart
/// [`Order`]: crate::Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    /// Display title of the catalog entry.
    pub title: String,
    /// Unit price in the shop currency. Exact decimal, never floating point.
    pub price: Decimal,
}

impl Good {
    /// Create a new good.
    #[must_use]
    pub const fn new(title: String, price: Decimal) -> Self {
        Self { title, price }
    }
}
